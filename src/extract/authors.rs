use crate::models::RawRecord;

/// Fill in omitted authors on continuation messages.
///
/// Consecutive messages from one sender only show the author label on the
/// first of them, so an empty author means "same as the previous record".
/// The last known author is carried through a fold; records before the first
/// labelled one keep an empty author.
pub fn resolve_authors(records: &mut [RawRecord]) {
    records.iter_mut().fold(String::new(), |last_known, record| {
        if record.author.is_empty() {
            record.author = last_known;
        }
        record.author.clone()
    });
}
