//! Typed builders for SES query API operations.
//!
//! Each builder turns validated, named inputs into the flat parameter map
//! the query API expects and pairs it with the operation's action name and
//! HTTP method. Builders never emit the reserved `Action` key; the signer
//! inserts it, so the collision cannot occur.

use http::Method;

use crate::{Error, Result};

/// A fully assembled operation, ready to be signed.
///
/// Constructed only by the builders in this module, which keep the
/// parameter list free of the reserved `Action` key.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    method: Method,
    action: &'static str,
    parameters: Vec<(String, String)>,
}

impl OperationRequest {
    fn new(method: Method, action: &'static str, parameters: Vec<(String, String)>) -> Self {
        Self {
            method,
            action,
            parameters,
        }
    }

    /// HTTP method of this operation.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Action name of this operation, e.g. `ListIdentities`.
    pub fn action(&self) -> &'static str {
        self.action
    }

    /// Parameter map of this operation, excluding `Action`.
    pub fn parameters(&self) -> &[(String, String)] {
        &self.parameters
    }
}

/// Kind of identity to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityType {
    /// A verified e-mail address.
    EmailAddress,
    /// A verified sending domain.
    Domain,
}

impl IdentityType {
    fn as_str(&self) -> &'static str {
        match self {
            IdentityType::EmailAddress => "EmailAddress",
            IdentityType::Domain => "Domain",
        }
    }
}

/// List the identities of the account, optionally filtered by type.
pub fn list_identities(identity_type: Option<IdentityType>) -> OperationRequest {
    let mut parameters = Vec::new();
    if let Some(ty) = identity_type {
        parameters.push(("IdentityType".to_string(), ty.as_str().to_string()));
    }

    OperationRequest::new(Method::GET, "ListIdentities", parameters)
}

/// Send a confirmation mail to an address so it can be verified as an
/// identity.
pub fn verify_email_identity(email: &str) -> Result<OperationRequest> {
    if !is_email(email) {
        return Err(Error::request_invalid(format!(
            "'{email}' is not a valid email address"
        )));
    }

    Ok(OperationRequest::new(
        Method::GET,
        "VerifyEmailIdentity",
        vec![("EmailAddress".to_string(), email.to_string())],
    ))
}

/// Delete a verified identity, either an e-mail address or a domain.
pub fn delete_identity(identity: &str) -> Result<OperationRequest> {
    if !is_email(identity) && !is_domain(identity) {
        return Err(Error::request_invalid(format!(
            "'{identity}' is neither an email address nor a domain"
        )));
    }

    Ok(OperationRequest::new(
        Method::GET,
        "DeleteIdentity",
        vec![("Identity".to_string(), identity.to_string())],
    ))
}

/// Fetch the account's sending limits.
pub fn get_send_quota() -> OperationRequest {
    OperationRequest::new(Method::GET, "GetSendQuota", Vec::new())
}

/// Fetch the account's sending statistics.
pub fn get_send_statistics() -> OperationRequest {
    OperationRequest::new(Method::GET, "GetSendStatistics", Vec::new())
}

/// Builder for the `SendEmail` operation.
///
/// Recipient lists expand to `Destination.ToAddresses.member.N` style
/// parameters, numbered from 1 in insertion order per list.
#[derive(Debug, Clone)]
pub struct SendEmail {
    source: String,
    subject: String,
    body: String,
    to: Vec<String>,
    cc: Vec<String>,
    bcc: Vec<String>,
}

impl SendEmail {
    /// Start a message from `source` with a subject and a plain-text body.
    pub fn new(source: &str, subject: &str, body: &str) -> Self {
        Self {
            source: source.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
        }
    }

    /// Add a To recipient.
    pub fn to(mut self, address: &str) -> Self {
        self.to.push(address.to_string());
        self
    }

    /// Add a Cc recipient.
    pub fn cc(mut self, address: &str) -> Self {
        self.cc.push(address.to_string());
        self
    }

    /// Add a Bcc recipient.
    pub fn bcc(mut self, address: &str) -> Self {
        self.bcc.push(address.to_string());
        self
    }

    /// Validate the message and assemble the operation request.
    ///
    /// Requires a valid source address and at least one recipient across
    /// the three destination lists; every recipient must be a valid e-mail
    /// address.
    pub fn into_request(self) -> Result<OperationRequest> {
        if !is_email(&self.source) {
            return Err(Error::request_invalid(format!(
                "source '{}' is not a valid email address",
                self.source
            )));
        }
        if self.to.is_empty() && self.cc.is_empty() && self.bcc.is_empty() {
            return Err(Error::request_invalid("at least one recipient is required"));
        }

        let mut parameters = vec![
            ("Message.Body.Text.Data".to_string(), self.body),
            ("Message.Subject.Data".to_string(), self.subject),
            ("Source".to_string(), self.source),
        ];
        push_addresses(&mut parameters, "To", &self.to)?;
        push_addresses(&mut parameters, "Cc", &self.cc)?;
        push_addresses(&mut parameters, "Bcc", &self.bcc)?;

        Ok(OperationRequest::new(Method::POST, "SendEmail", parameters))
    }
}

fn push_addresses(
    parameters: &mut Vec<(String, String)>,
    destination: &str,
    addresses: &[String],
) -> Result<()> {
    for (i, address) in addresses.iter().enumerate() {
        if !is_email(address) {
            return Err(Error::request_invalid(format!(
                "recipient '{address}' is not a valid email address"
            )));
        }
        parameters.push((
            format!("Destination.{}Addresses.member.{}", destination, i + 1),
            address.to_string(),
        ));
    }

    Ok(())
}

/// Structural e-mail check: one `@`, non-empty local part without spaces
/// or control characters, domain part that passes [`is_domain`].
fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.contains('@') {
        return false;
    }
    if !local.chars().all(|c| c.is_ascii_graphic()) {
        return false;
    }

    is_domain(domain)
}

/// Bare domain check: dot-separated lowercase alphanumeric labels with
/// inner hyphens, at least two labels, alphabetic TLD of length >= 2.
fn is_domain(s: &str) -> bool {
    let labels: Vec<&str> = s.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let (tld, rest) = labels.split_last().expect("labels is non-empty");
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_lowercase()) {
        return false;
    }

    rest.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && !label.contains("--")
            && label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_identities() {
        let req = list_identities(None);
        assert_eq!(req.action(), "ListIdentities");
        assert_eq!(*req.method(), Method::GET);
        assert!(req.parameters().is_empty());

        let req = list_identities(Some(IdentityType::Domain));
        assert_eq!(
            req.parameters(),
            &[("IdentityType".to_string(), "Domain".to_string())]
        );
    }

    #[test]
    fn test_verify_email_identity() {
        let req = verify_email_identity("user@example.com").unwrap();
        assert_eq!(
            req.parameters(),
            &[("EmailAddress".to_string(), "user@example.com".to_string())]
        );

        for bad in ["", "example.com", "@example.com", "a b@example.com"] {
            assert!(verify_email_identity(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_delete_identity_accepts_email_or_domain() {
        assert!(delete_identity("user@example.com").is_ok());
        assert!(delete_identity("mail.example.com").is_ok());
        assert!(delete_identity("my-app.example.co").is_ok());

        for bad in ["not a domain", "example", "-bad.example.com", "user@"] {
            assert!(delete_identity(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_quota_and_statistics_have_no_parameters() {
        assert!(get_send_quota().parameters().is_empty());
        assert!(get_send_statistics().parameters().is_empty());
        assert_eq!(get_send_statistics().action(), "GetSendStatistics");
    }

    #[test]
    fn test_send_email_member_numbering() {
        let req = SendEmail::new("from@example.com", "subject", "body")
            .to("a@example.com")
            .to("b@example.com")
            .cc("c@example.com")
            .into_request()
            .unwrap();

        assert_eq!(*req.method(), Method::POST);
        assert_eq!(
            req.parameters(),
            &[
                ("Message.Body.Text.Data".to_string(), "body".to_string()),
                ("Message.Subject.Data".to_string(), "subject".to_string()),
                ("Source".to_string(), "from@example.com".to_string()),
                (
                    "Destination.ToAddresses.member.1".to_string(),
                    "a@example.com".to_string()
                ),
                (
                    "Destination.ToAddresses.member.2".to_string(),
                    "b@example.com".to_string()
                ),
                (
                    "Destination.CcAddresses.member.1".to_string(),
                    "c@example.com".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_send_email_requires_recipient_and_valid_source() {
        let err = SendEmail::new("from@example.com", "s", "b")
            .into_request()
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);

        let err = SendEmail::new("not-an-address", "s", "b")
            .to("a@example.com")
            .into_request()
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);

        let err = SendEmail::new("from@example.com", "s", "b")
            .to("bad recipient")
            .into_request()
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::RequestInvalid);
    }
}
