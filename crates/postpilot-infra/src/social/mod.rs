//! Social platform publish clients - Facebook Graph and LinkedIn UGC.

mod facebook;
mod linkedin;

pub use facebook::{FacebookClient, FacebookConfig};
pub use linkedin::{LinkedinClient, LinkedinConfig};
