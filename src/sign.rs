//! SES query API sigv4 signer

use std::fmt::Write;

use http::header;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::constants::{
    ALGORITHM, AWS_QUERY_ENCODE_SET, CANONICAL_URI, DEFAULT_REGION, DOMAIN, EMPTY_PAYLOAD_HASH,
    SERVICE, SIGNED_HEADERS, X_AMZ_DATE,
};
use crate::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use crate::operation::OperationRequest;
use crate::time::{format_date, format_iso8601, now, DateTime};
use crate::{Credential, Error, Result};

/// Signer that implements AWS SigV4 for the SES query API.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// The whole request payload travels in the query string, so the signer
/// produces the encoded query string together with the `Authorization` and
/// `x-amz-date` headers. It performs no I/O and holds no mutable state.
#[derive(Debug)]
pub struct Signer {
    credential: Credential,
    region: String,
    host: String,

    time: Option<DateTime>,
}

impl Signer {
    /// Create a new signer for the given credential.
    ///
    /// The region defaults to `us-east-1` when the credential carries none.
    /// Fails with `ConfigInvalid` if the access key id or secret access key
    /// is missing or empty.
    pub fn new(credential: Credential) -> Result<Self> {
        if !credential.is_valid() {
            return Err(Error::config_invalid(
                "access key id and secret access key must be set and non-empty",
            ));
        }

        let region = credential
            .region
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let host = format!("{SERVICE}.{region}.{DOMAIN}");

        Ok(Self {
            credential,
            region,
            host,
            time: None,
        })
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests; signatures are
    /// only valid within a short window around their timestamp. Only use
    /// this function for testing or replaying a pinned instant.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Host of the regional endpoint this signer signs for, e.g.
    /// `email.us-east-1.amazonaws.com`.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Sign a typed operation request.
    pub fn sign_operation(&self, req: &OperationRequest) -> Result<SignatureOutput> {
        self.sign(req.method(), req.action(), req.parameters())
    }

    /// Sign a request given its method, action name, and parameter map.
    ///
    /// `parameters` must not contain the reserved `Action` key; it is
    /// inserted here from `action`. Prefer [`Signer::sign_operation`] with
    /// the typed builders, which rule the collision out structurally.
    pub fn sign(
        &self,
        method: &Method,
        action: &str,
        parameters: &[(String, String)],
    ) -> Result<SignatureOutput> {
        if method != Method::GET && method != Method::POST {
            return Err(Error::request_invalid(format!(
                "method {method} is not supported by the query API, expected GET or POST"
            )));
        }

        let now = self.time.unwrap_or_else(now);
        let date = format_date(now);
        let timestamp = format_iso8601(now);

        let query_string = canonical_query_string(action, parameters);

        let creq = canonical_request_string(method, &query_string, &self.host, &timestamp)?;
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20150101/<region>/email/aws4_request"
        let scope = format!("{}/{}/{}/aws4_request", date, self.region, SERVICE);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20150101T000000Z
        // 20150101/<region>/email/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{ALGORITHM}")?;
            writeln!(f, "{timestamp}")?;
            writeln!(f, "{scope}")?;
            write!(f, "{encoded_req}")?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = generate_signing_key(
            &self.credential.secret_access_key,
            &date,
            &self.region,
            SERVICE,
        );
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes());

        let mut authorization = HeaderValue::from_str(&format!(
            "{ALGORITHM} Credential={}/{}, SignedHeaders={}, Signature={}",
            self.credential.access_key_id, scope, SIGNED_HEADERS, signature
        ))?;
        authorization.set_sensitive(true);

        let amz_date = HeaderValue::from_str(&timestamp)?;

        Ok(SignatureOutput {
            query_string,
            authorization,
            amz_date,
        })
    }
}

/// Output of one signing: everything the transport needs to attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureOutput {
    /// Encoded canonical query string, ready to append to the endpoint URL
    /// for GET requests or to send as the POST body.
    pub query_string: String,
    /// `Authorization` header value, marked sensitive.
    pub authorization: HeaderValue,
    /// `x-amz-date` header value.
    pub amz_date: HeaderValue,
}

impl SignatureOutput {
    /// Insert the two signed headers into a header map.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.insert(header::AUTHORIZATION, self.authorization.clone());
        headers.insert(X_AMZ_DATE, self.amz_date.clone());
    }
}

/// Merge `Action` into the parameters and canonicalize: sort byte-wise by
/// key, then percent-encode each key and value with the strict set.
///
/// Space encodes to `%20`; the form-encoding `+` variant would produce a
/// signature the service rejects.
fn canonical_query_string(action: &str, parameters: &[(String, String)]) -> String {
    let mut query = parameters.to_vec();
    query.push(("Action".to_string(), action.to_string()));
    query.sort();

    query
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn canonical_request_string(
    method: &Method,
    query: &str,
    host: &str,
    timestamp: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{method}")?;
    writeln!(f, "{CANONICAL_URI}")?;
    writeln!(f, "{query}")?;
    // Canonical headers, lowercase and each terminated by a newline, then
    // the blank separator line and the signed header names.
    writeln!(f, "host:{host}")?;
    writeln!(f, "{X_AMZ_DATE}:{timestamp}")?;
    writeln!(f)?;
    writeln!(f, "{SIGNED_HEADERS}")?;
    // Query API requests never carry a body.
    write!(f, "{EMPTY_PAYLOAD_HASH}")?;

    Ok(f)
}

fn generate_signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), date.as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
