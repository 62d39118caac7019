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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// Service name used in credential scope and endpoint host.
pub const SERVICE: &str = "email";
/// Domain suffix of regional SES endpoints.
pub const DOMAIN: &str = "amazonaws.com";
/// Region applied when the credential carries none.
pub const DEFAULT_REGION: &str = "us-east-1";
/// SigV4 algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";
/// Canonical URI of the SES query API.
pub const CANONICAL_URI: &str = "/";

pub const X_AMZ_DATE: &str = "x-amz-date";

/// Signed header names of a query API request, sorted and `;`-joined.
pub const SIGNED_HEADERS: &str = "host;x-amz-date";

/// SHA-256 hex digest of the empty byte sequence.
///
/// The query API carries its whole payload in the query string, so every
/// request body is empty. Signing a non-empty body would require taking the
/// payload as an explicit input instead of this constant.
pub const EMPTY_PAYLOAD_HASH: &str =
    "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// AsciiSet for [AWS UriEncode](https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html)
/// as used in query strings.
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space must become `%20`, never `+`.
pub static AWS_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
