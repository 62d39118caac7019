//! Sign Amazon SES query API requests with AWS Signature Version 4.
//!
//! This crate is the signing core of an SES client: it turns an API
//! operation and its parameters into the exact query string, `Authorization`
//! header, and `x-amz-date` header the service expects. Sending the request
//! and parsing the XML response are the caller's business.
//!
//! ## Example
//!
//! ```no_run
//! use ses_sigv4::{Credential, Signer};
//! use ses_sigv4::operation;
//!
//! # fn main() -> ses_sigv4::Result<()> {
//! let signer = Signer::new(Credential {
//!     access_key_id: "AKIDEXAMPLE".to_string(),
//!     secret_access_key: "secret".to_string(),
//!     region: None,
//! })?;
//!
//! let req = operation::list_identities(None);
//! let out = signer.sign_operation(&req)?;
//!
//! // GET https://email.us-east-1.amazonaws.com/?{out.query_string}
//! // with out.authorization and out.amz_date attached as headers.
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod operation;
pub mod time;
pub mod utils;

mod constants;
mod credential;
pub use credential::Credential;
mod error;
pub use error::{Error, ErrorKind, Result};
mod sign;
pub use sign::{SignatureOutput, Signer};
