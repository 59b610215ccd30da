use std::fmt;

/// Dataset partition a rendered image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Val,
    Test,
}
impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}
impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How many images to render per subject for one split.
///
/// The count stays signed up to plan validation so that a negative
/// value coming from configuration is rejected rather than wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitSpec {
    pub split: Split,
    pub renders_per_subject: i64,
}
impl SplitSpec {
    pub fn new(split: Split, renders_per_subject: i64) -> Self {
        Self {
            split,
            renders_per_subject,
        }
    }
}
