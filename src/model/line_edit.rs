use time::{Date, OffsetDateTime, Time, UtcOffset};

/// One source line attributed to the commit that last touched it
#[derive(Debug, Clone, PartialEq)]
pub struct LineEdit {
    pub commit_id: String,
    pub file: String,
    pub line: u32,
    /// Language/category tag (the file extension)
    pub kind: String,
    pub depth: u32,
    pub length: u32,
    pub author: String,
    pub date: Date,
    pub time: Time,
    pub timezone: UtcOffset,
    pub datetime: OffsetDateTime,
}

impl LineEdit {
    /// Create an edit whose date, time and timezone columns are taken from `datetime`
    pub fn new(
        commit_id: impl Into<String>,
        file: impl Into<String>,
        line: u32,
        kind: impl Into<String>,
        author: impl Into<String>,
        datetime: OffsetDateTime,
    ) -> Self {
        Self {
            commit_id: commit_id.into(),
            file: file.into(),
            line,
            kind: kind.into(),
            depth: 0,
            length: 0,
            author: author.into(),
            date: datetime.date(),
            time: datetime.time(),
            timezone: datetime.offset(),
            datetime,
        }
    }

    /// Set indentation depth and character length of the line
    pub fn with_shape(mut self, depth: u32, length: u32) -> Self {
        self.depth = depth;
        self.length = length;
        self
    }
}
