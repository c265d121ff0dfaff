/// Errors raised while constructing a widget.
///
/// Search failures are not here: they are rendered, never returned.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("invalid widget configuration: {0}")]
    InvalidConfig(String),
}

pub type WidgetResult<T> = std::result::Result<T, WidgetError>;
