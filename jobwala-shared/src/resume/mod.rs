/// Resume processing
///
/// - `extractor`: Regex-based extraction of structured fields from raw resume text
/// - `storage`: Validated on-disk storage of uploaded resume files
pub mod extractor;
pub mod storage;
