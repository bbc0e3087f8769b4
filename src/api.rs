use serde::Serialize;

/// Uniform `{success, data|msg}` wrapper returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            msg: None,
        }
    }
}

impl Envelope<()> {
    pub fn msg(msg: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: None,
            msg: Some(msg.into()),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            msg: Some(msg.into()),
        }
    }
}
