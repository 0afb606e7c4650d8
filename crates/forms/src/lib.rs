//! Custom audiences destination forms: progressive disclosure of the
//! destination configuration form and the OAuth login form.

pub mod api;
pub mod builder;
pub mod fields;
pub mod login;
pub mod options;
pub mod stages;

pub use api::{AdAccountLister, AudienceLister};
pub use builder::AudienceFormBuilder;
pub use fields::{AudienceAction, HashingChoice};
pub use stages::{plan, Branch, Stage};
