use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("Unrecognized column layout ({layout}): {reason}")]
    Format { layout: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render {view}: {reason}")]
    Render { view: &'static str, reason: String },
}

impl LinkMapError {
    pub fn format(layout: &'static str, reason: impl Into<String>) -> Self {
        LinkMapError::Format {
            layout,
            reason: reason.into(),
        }
    }

    pub fn render(view: &'static str, reason: impl Into<String>) -> Self {
        LinkMapError::Render {
            view,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the shape of the input file rather than I/O.
    pub fn is_format_error(&self) -> bool {
        matches!(self, LinkMapError::Format { .. } | LinkMapError::Csv(_))
    }

    /// Human readable description of the column layouts linkmap accepts.
    pub fn layout_hint() -> &'static str {
        "Expected either a first column with the source page followed by pairs of \
         (target URL, anchor text) columns, or a 'Dirección' column plus matching \
         'URL_Destino_N' / 'Texto_Ancla_N' columns."
    }
}

pub type Result<T> = std::result::Result<T, LinkMapError>;
