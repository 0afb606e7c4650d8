use audience_core::types::{FormOption, RemoteEntity};

/// Project remote entities into select options, id as the machine value and
/// name as the label. Order is preserved.
pub fn project(entities: &[RemoteEntity]) -> Vec<FormOption> {
    entities
        .iter()
        .map(|entity| FormOption::new(entity.id.as_str(), entity.name.as_str()))
        .collect()
}
