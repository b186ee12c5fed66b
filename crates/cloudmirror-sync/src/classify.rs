//! Vendor error classification
//!
//! Each vendor has a fixed set of known-benign responses: a region the
//! account never opted into, an API that is simply not enabled for the
//! project, a resource provider the subscription never registered. Treating
//! those as failures would abort an otherwise healthy sync, so the stage
//! runner passes every cloud-call error through [`classify`] before it can
//! reach the fan-out's error aggregation.

use cloudmirror_cloud::{CloudError, Vendor};

/// Fragments of TCloud responses for regions the account cannot use.
const TCLOUD_BENIGN: &[&str] = &[
    "UnsupportedRegion",
    "UnauthorizedOperation.InvalidAccount",
    "AuthFailure.UnauthorizedOperation",
];

/// AWS regions that are not opted in reject every call with one of these.
const AWS_BENIGN: &[&str] = &["OptInRequired", "AuthFailure", "UnauthorizedOperation"];

/// HuaWei accounts without a grant on a region get an IAM agency rejection,
/// and some regions simply do not carry a given service endpoint.
const HUAWEI_BENIGN: &[&str] = &[
    "APIGW.0301",
    "unsupported regionID",
    "Incorrect IAM authentication information",
];

/// GCP projects reject calls for APIs that were never enabled.
const GCP_BENIGN: &[&str] = &[
    "accessNotConfigured",
    "has not been used in project",
    "SERVICE_DISABLED",
];

/// Azure subscriptions reject resource types whose provider is unregistered.
const AZURE_BENIGN: &[&str] = &[
    "SubscriptionNotRegistered",
    "NoRegisteredProviderFound",
    "MissingSubscriptionRegistration",
];

fn benign_patterns(vendor: Vendor) -> &'static [&'static str] {
    match vendor {
        Vendor::TCloud => TCLOUD_BENIGN,
        Vendor::Aws => AWS_BENIGN,
        Vendor::HuaWei => HUAWEI_BENIGN,
        Vendor::Gcp => GCP_BENIGN,
        Vendor::Azure => AZURE_BENIGN,
        // Other hosts never reach a provider API.
        Vendor::Other => &[],
    }
}

/// Classify a cloud-call error for the given vendor.
///
/// Returns `None` when the error matches a known-benign pattern (the caller
/// treats the call as successful) and `Some(err)` otherwise, with the error
/// passed through unchanged.
pub fn classify(vendor: Vendor, err: CloudError) -> Option<CloudError> {
    let text = err.failure_reason();
    if benign_patterns(vendor).iter().any(|p| text.contains(p)) {
        tracing::debug!(%vendor, %err, "suppressing known-benign vendor error");
        return None;
    }
    Some(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_errors_are_suppressed() {
        let err = CloudError::api("OptInRequired: you are not subscribed to this service");
        assert!(classify(Vendor::Aws, err).is_none());

        let err = CloudError::api(
            "Compute Engine API has not been used in project 1234 before or it is disabled",
        );
        assert!(classify(Vendor::Gcp, err).is_none());

        let err = CloudError::api("code: MissingSubscriptionRegistration");
        assert!(classify(Vendor::Azure, err).is_none());
    }

    #[test]
    fn patterns_are_matched_in_structured_bodies() {
        let err = CloudError::api_with_body(
            "DescribeInstances failed",
            serde_json::json!({ "Code": "UnsupportedRegion", "Region": "ap-jakarta" }),
        );
        assert!(classify(Vendor::TCloud, err).is_none());
    }

    #[test]
    fn unknown_errors_pass_through_unchanged() {
        let err = CloudError::api("RequestLimitExceeded");
        match classify(Vendor::Aws, err) {
            Some(CloudError::Api { message, .. }) => {
                assert_eq!(message, "RequestLimitExceeded");
            }
            other => panic!("expected pass-through, got {:?}", other),
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let err = CloudError::api("RequestLimitExceeded");
        let passed = classify(Vendor::Aws, err).unwrap();
        // Re-classifying a passed-through error changes nothing.
        match classify(Vendor::Aws, passed) {
            Some(CloudError::Api { message, .. }) => {
                assert_eq!(message, "RequestLimitExceeded");
            }
            other => panic!("expected pass-through, got {:?}", other),
        }
    }

    #[test]
    fn patterns_are_per_vendor() {
        // A GCP-benign message on TCloud is a real error.
        let err = CloudError::api("accessNotConfigured");
        assert!(classify(Vendor::TCloud, err).is_some());
    }
}
