use derive_builder::Builder;
use derive_getters::Getters;

/// Metadata the server volunteers while a folder is being selected.
#[derive(Builder, Debug, Getters)]
pub struct Mailbox {
    name: String,
    #[builder(default)]
    readonly: bool,
    #[builder(default)]
    flags: Vec<String>,
    #[builder(default)]
    exists: u32,
    #[builder(default)]
    recent: u32,
    #[builder(setter(strip_option), default)]
    unseen: Option<u32>,
}
