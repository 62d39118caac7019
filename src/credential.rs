// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::utils::Redact;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access_key and secret_key.
#[derive(Default, Clone)]
pub struct Credential {
    /// Access key id for the AWS account.
    pub access_key_id: String,
    /// Secret access key for the AWS account.
    pub secret_access_key: String,
    /// Region of the SES endpoint; `us-east-1` is used when absent.
    pub region: Option<String>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("region", &self.region)
            .finish()
    }
}

impl Credential {
    /// Check that both keys are present and non-empty.
    pub fn is_valid(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_keys() {
        let cred = Credential {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY".to_string(),
            region: Some("eu-west-1".to_string()),
        };

        let out = format!("{cred:?}");
        assert!(!out.contains("wJalrXUtnFEMI"));
        assert!(out.contains("eu-west-1"));
    }

    #[test]
    fn test_is_valid() {
        assert!(!Credential::default().is_valid());
        assert!(Credential {
            access_key_id: "ak".to_string(),
            secret_access_key: "sk".to_string(),
            region: None,
        }
        .is_valid());
    }
}
