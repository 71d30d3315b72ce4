use bytes::Bytes;

/// The message a relay was triggered from; replies are threaded under it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    pub channel: String,
    pub ts: String,
}

impl Origin {
    pub fn new(channel: impl Into<String>, ts: impl Into<String>) -> Self {
        Self { channel: channel.into(), ts: ts.into() }
    }
}

/// A file attached to the triggering message.
///
/// `binary` is empty until the pipeline downloads the file. Each `FileRef` is
/// moved into a single relay run and never shared between files or requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileRef {
    pub id: String,
    pub name: String,
    pub source_url: String,
    pub binary: Option<Bytes>,
}

impl FileRef {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self { id: id.into(), name: name.into(), source_url: source_url.into(), binary: None }
    }

    pub fn size_bytes(&self) -> usize {
        self.binary.as_ref().map(Bytes::len).unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallbackEvent {
    pub kind: String,
    pub origin: Origin,
    pub files: Vec<FileRef>,
}
