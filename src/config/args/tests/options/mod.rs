mod acl;
mod credential_source;
mod timeout;
mod tracing;
