/// One block of a document, borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the document.
    pub offset: usize,
}

/// Split a document into blocks separated by blank lines.
///
/// A blank line is empty or whitespace only. Lines inside a block keep their
/// newline separators; the block's final line ending is not included.
pub fn segment(source: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut block: Option<(usize, usize)> = None;
    let mut line_start = 0;

    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches('\n').trim_end_matches('\r');
        if content.trim().is_empty() {
            if let Some((start, end)) = block.take() {
                segments.push(Segment {
                    text: &source[start..end],
                    offset: start,
                });
            }
        } else {
            let end = line_start + content.len();
            block = match block {
                Some((start, _)) => Some((start, end)),
                None => Some((line_start, end)),
            };
        }
        line_start += line.len();
    }

    if let Some((start, end)) = block {
        segments.push(Segment {
            text: &source[start..end],
            offset: start,
        });
    }

    segments
}
