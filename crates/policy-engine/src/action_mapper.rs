//! Maps a vendor-specific S3 action verb (e.g. `s3:GetObject`) onto one of
//! the five coarse access types a policy can grant.

use reaper_core::AccessType;

const READ_ACTIONS: &[&str] = &[
    "s3:GetObject",
    "s3:GetObjectAcl",
    "s3:GetObjectTagging",
    "s3:GetObjectVersion",
    "s3:GetObjectVersionAcl",
    "s3:GetObjectVersionTagging",
    "s3:GetBucketAcl",
    "s3:GetBucketCORS",
    "s3:GetBucketLocation",
    "s3:GetBucketLogging",
    "s3:GetBucketNotification",
    "s3:GetBucketPolicy",
    "s3:GetBucketRequestPayment",
    "s3:GetBucketTagging",
    "s3:GetBucketVersioning",
    "s3:GetBucketWebsite",
    "s3:GetLifecycleConfiguration",
    "s3:GetReplicationConfiguration",
];

const LIST_ACTIONS: &[&str] = &[
    "s3:ListBucket",
    "s3:ListBucketVersions",
    "s3:ListAllMyBuckets",
    "s3:ListMultipartUploadParts",
    "s3:ListBucketMultipartUploads",
    "s3:ListObjectsV2",
];

const WRITE_ACTIONS: &[&str] = &[
    "s3:PutObject",
    "s3:PutObjectAcl",
    "s3:PutObjectTagging",
    "s3:PutObjectVersionAcl",
    "s3:PutObjectVersionTagging",
    "s3:PutBucketAcl",
    "s3:PutBucketCORS",
    "s3:PutBucketLogging",
    "s3:PutBucketNotification",
    "s3:PutBucketPolicy",
    "s3:PutBucketRequestPayment",
    "s3:PutBucketTagging",
    "s3:PutBucketVersioning",
    "s3:PutBucketWebsite",
    "s3:PutLifecycleConfiguration",
    "s3:PutReplicationConfiguration",
    "s3:RestoreObject",
    "s3:CreateBucket",
];

const DELETE_ACTIONS: &[&str] = &[
    "s3:DeleteObject",
    "s3:DeleteObjectVersion",
    "s3:DeleteBucket",
    "s3:DeleteObjectTagging",
    "s3:DeleteObjectVersionTagging",
    "s3:AbortMultipartUpload",
];

/// Map a full `s3:Verb` action token to a coarse [`AccessType`]. Any verb
/// not in the tables above (including unrecognized/malformed tokens) maps
/// to [`AccessType::Admin`].
pub fn map_action(action: &str) -> AccessType {
    if READ_ACTIONS.contains(&action) {
        AccessType::Read
    } else if LIST_ACTIONS.contains(&action) {
        AccessType::List
    } else if WRITE_ACTIONS.contains(&action) {
        AccessType::Write
    } else if DELETE_ACTIONS.contains(&action) {
        AccessType::Delete
    } else {
        AccessType::Admin
    }
}
