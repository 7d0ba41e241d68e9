pub mod canned_acl;
pub mod url;
