use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("failed to fetch {url}: {reason}")]
    Network { url: String, reason: String },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
    #[error("malformed hierarchy JSON: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("node '{name}' has invalid size {size}")]
    InvalidWeight { name: String, size: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlBindingError {
    #[error("no checkbox bound for branch index {index} (have {available} checkboxes)")]
    MissingCheckbox { index: usize, available: usize },
    #[error("unknown control '{0}'")]
    UnknownControl(String),
    #[error("control '{0}' has no handler")]
    Unbound(String),
    #[error("unknown color scheme '{0}'")]
    UnknownPalette(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Binding(#[from] ControlBindingError),
}

impl ChartError {
    pub fn title(&self) -> &'static str {
        match self {
            ChartError::Load(_) => "Could not load data",
            ChartError::Layout(_) => "Could not lay out the hierarchy",
            ChartError::Binding(_) => "Controls are misconfigured",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn umbrella_wraps_sources_transparently() {
        let err: ChartError = LayoutError::InvalidWeight { name: "x".into(), size: -1.0 }.into();
        assert_eq!(err.to_string(), "node 'x' has invalid size -1");
        assert_eq!(err.title(), "Could not lay out the hierarchy");
        let err: ChartError = ControlBindingError::MissingCheckbox { index: 1, available: 3 }.into();
        assert!(err.to_string().contains("branch index 1"));
    }
}
