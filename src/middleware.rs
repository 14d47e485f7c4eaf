pub mod auth;
pub mod i18n;
pub mod rbac;
pub mod validated_json;
pub mod validated_path;
