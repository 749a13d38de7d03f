//! K-way merge of pre-sorted inputs
//!
//! Each round scans every open cursor, drops the exhausted ones, and moves the
//! most extreme buffered line into the result. Inputs are trusted to already be
//! sorted with the same comparator; nothing here checks that.

use std::io::BufRead;

use crate::domain::{Configuration, ElementType, SortDirection};
use crate::error::{MergeError, Result};

pub mod cursor;
pub mod order;

pub use cursor::{open_cursors, Cursor};
pub use order::{Descending, Lexicographic, LineOrder, Numeric};

/// Merge `cursors` using the strategy selected by `config`.
///
/// Cursors are closed as soon as they run dry. On error the remaining ones are
/// closed before returning and no partial result is produced.
pub fn merge<R: BufRead>(config: &Configuration, cursors: Vec<Cursor<R>>) -> Result<Vec<String>> {
    match (config.element_type, config.sort_direction) {
        (ElementType::String, SortDirection::Ascending) => merge_with(&Lexicographic, cursors),
        (ElementType::String, SortDirection::Descending) => {
            merge_with(&Descending(Lexicographic), cursors)
        }
        (ElementType::Integer, SortDirection::Ascending) => merge_with(&Numeric, cursors),
        (ElementType::Integer, SortDirection::Descending) => {
            merge_with(&Descending(Numeric), cursors)
        }
    }
}

/// Open every input of `config` and merge them.
pub fn merge_files(config: &Configuration) -> Result<Vec<String>> {
    let cursors = open_cursors(config.input_paths.as_slice())?;
    tracing::info!(
        "Merging {} inputs ({:?}, {:?})",
        cursors.len(),
        config.element_type,
        config.sort_direction
    );
    let merged = merge(config, cursors)?;
    tracing::info!("Merged {} lines", merged.len());
    Ok(merged)
}

/// Merge with an explicit strategy. The smallest key is emitted first.
pub fn merge_with<O, R>(order: &O, mut cursors: Vec<Cursor<R>>) -> Result<Vec<String>>
where
    O: LineOrder,
    R: BufRead,
{
    let mut merged = Vec::new();
    loop {
        drop_exhausted(&mut cursors)?;
        let Some(winner) = select_extreme(order, &cursors)? else {
            break;
        };
        merged.extend(cursors[winner].consume());
    }
    Ok(merged)
}

/// Fill every lookahead buffer and close the cursors that have nothing left.
fn drop_exhausted<R: BufRead>(cursors: &mut Vec<Cursor<R>>) -> Result<()> {
    let mut idx = 0;
    while idx < cursors.len() {
        if cursors[idx].peek()?.is_some() {
            idx += 1;
            continue;
        }
        let closed = cursors.remove(idx);
        tracing::debug!("Closed {} after {} lines", closed.path().display(), closed.line_number());
    }
    Ok(())
}

/// Index of the cursor holding the smallest key, or `None` when no cursor is open.
fn select_extreme<O, R>(order: &O, cursors: &[Cursor<R>]) -> Result<Option<usize>>
where
    O: LineOrder,
    R: BufRead,
{
    let mut best: Option<(usize, O::Key<'_>)> = None;

    for (idx, cursor) in cursors.iter().enumerate() {
        let Some(line) = cursor.buffered() else {
            continue;
        };
        let key = order.key(line).map_err(|source| MergeError::Parse {
            path: cursor.path().to_path_buf(),
            line_number: cursor.line_number(),
            line: line.to_string(),
            source,
        })?;

        // Strictly smaller only, so the earliest cursor keeps a tie.
        if best.as_ref().map_or(true, |(_, current)| key < *current) {
            best = Some((idx, key));
        }
    }

    Ok(best.map(|(idx, _)| idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::{self, Cursor as IoCursor, Read};
    use std::path::PathBuf;
    use std::rc::Rc;

    type MemCursor = Cursor<IoCursor<Vec<u8>>>;

    fn config(element_type: ElementType, sort_direction: SortDirection) -> Configuration {
        Configuration {
            sort_direction,
            element_type,
            output_path: PathBuf::from("out.txt"),
            input_paths: vec![PathBuf::from("in.txt")],
        }
    }

    fn cursors(inputs: &[&str]) -> Vec<MemCursor> {
        inputs
            .iter()
            .enumerate()
            .map(|(idx, text)| {
                Cursor::new(format!("in{idx}.txt"), IoCursor::new(text.as_bytes().to_vec()))
            })
            .collect()
    }

    fn run(element_type: ElementType, direction: SortDirection, inputs: &[&str]) -> Vec<String> {
        merge(&config(element_type, direction), cursors(inputs)).expect("merge")
    }

    #[test]
    fn test_merges_integers_ascending() {
        let merged = run(ElementType::Integer, SortDirection::Ascending, &["1\n3\n5", "2\n4\n6"]);
        assert_eq!(merged, vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_merges_strings_descending() {
        let merged = run(ElementType::String, SortDirection::Descending, &["banana\napple", "cherry"]);
        assert_eq!(merged, vec!["cherry", "banana", "apple"]);
    }

    #[test]
    fn test_merges_integers_descending_numerically() {
        let merged =
            run(ElementType::Integer, SortDirection::Descending, &["100\n9\n-3", "10\n2", "50"]);
        assert_eq!(merged, vec!["100", "50", "10", "9", "2", "-3"]);
    }

    #[test]
    fn test_strings_compare_lexicographically() {
        let merged = run(ElementType::String, SortDirection::Ascending, &["10\n9", "2"]);
        assert_eq!(merged, vec!["10", "2", "9"]);
    }

    #[test]
    fn test_emits_original_integer_text() {
        let merged = run(ElementType::Integer, SortDirection::Ascending, &["+2\n007", "-1\n5"]);
        assert_eq!(merged, vec!["-1", "+2", "5", "007"]);
    }

    #[test]
    fn test_extreme_integer_values_are_emitted() {
        let merged = run(
            ElementType::Integer,
            SortDirection::Ascending,
            &["-2147483648\n2147483647", "9223372036854775807"],
        );
        assert_eq!(merged, vec!["-2147483648", "2147483647", "9223372036854775807"]);
    }

    #[test]
    fn test_ties_go_to_the_earliest_cursor() {
        let merged = run(ElementType::Integer, SortDirection::Ascending, &["01\n2", "1", "+1"]);
        assert_eq!(merged, vec!["01", "1", "+1", "2"]);

        let merged = run(ElementType::Integer, SortDirection::Descending, &["+1", "1\n0"]);
        assert_eq!(merged, vec!["+1", "1", "0"]);
    }

    #[test]
    fn test_empty_inputs_produce_nothing() {
        assert!(run(ElementType::String, SortDirection::Ascending, &[""]).is_empty());
        assert!(run(ElementType::Integer, SortDirection::Descending, &["", "", ""]).is_empty());
        assert!(run(ElementType::String, SortDirection::Ascending, &[]).is_empty());
    }

    #[test]
    fn test_empty_input_contributes_nothing() {
        let merged = run(ElementType::String, SortDirection::Ascending, &["", "b", "", "a\nc"]);
        assert_eq!(merged, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_single_line_single_input() {
        assert_eq!(run(ElementType::Integer, SortDirection::Ascending, &["42\n"]), vec!["42"]);
    }

    #[test]
    fn test_non_numeric_line_aborts_with_parse_error() {
        let err = merge(
            &config(ElementType::Integer, SortDirection::Ascending),
            cursors(&["1\n2\nthree", "4"]),
        )
        .unwrap_err();

        match err {
            MergeError::Parse { path, line_number, line, .. } => {
                assert_eq!(path, PathBuf::from("in0.txt"));
                assert_eq!(line_number, 3);
                assert_eq!(line, "three");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_line_is_fine_in_string_mode() {
        let merged = run(ElementType::String, SortDirection::Ascending, &["1\nthree", "2"]);
        assert_eq!(merged, vec!["1", "2", "three"]);
    }

    #[test]
    fn test_output_is_sorted_permutation_and_repeatable() {
        let mut state: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state % 2001) as i64 - 1000
        };

        let mut all = Vec::new();
        let inputs: Vec<String> = (0..7)
            .map(|n| {
                let mut values: Vec<i64> = (0..(n * 11 % 23)).map(|_| next()).collect();
                values.sort_unstable();
                all.extend(values.iter().copied());
                values.iter().map(i64::to_string).collect::<Vec<_>>().join("\n")
            })
            .collect();
        let inputs: Vec<&str> = inputs.iter().map(String::as_str).collect();

        let merged = run(ElementType::Integer, SortDirection::Ascending, &inputs);
        let values: Vec<i64> = merged.iter().map(|line| line.parse().unwrap()).collect();

        all.sort_unstable();
        assert_eq!(values, all);
        assert_eq!(run(ElementType::Integer, SortDirection::Ascending, &inputs), merged);
    }

    struct Tracked {
        inner: IoCursor<Vec<u8>>,
        drops: Rc<Cell<usize>>,
    }

    impl Read for Tracked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl BufRead for Tracked {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            self.inner.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn tracked(inputs: &[&str], drops: &Rc<Cell<usize>>) -> Vec<Cursor<Tracked>> {
        inputs
            .iter()
            .map(|text| {
                let reader = Tracked {
                    inner: IoCursor::new(text.as_bytes().to_vec()),
                    drops: Rc::clone(drops),
                };
                Cursor::new("tracked.txt", reader)
            })
            .collect()
    }

    #[test]
    fn test_every_cursor_is_closed_once() {
        let drops = Rc::new(Cell::new(0));
        let merged = merge(
            &config(ElementType::String, SortDirection::Ascending),
            tracked(&["a\nc", "", "b"], &drops),
        )
        .expect("merge");
        assert_eq!(merged, vec!["a", "b", "c"]);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn test_open_cursors_are_closed_on_abort() {
        let drops = Rc::new(Cell::new(0));
        let result = merge(
            &config(ElementType::Integer, SortDirection::Ascending),
            tracked(&["1\nx", "2\n3", "4"], &drops),
        );
        assert!(result.is_err());
        assert_eq!(drops.get(), 3);
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_read_failure_is_io_error() {
        let cursors = vec![Cursor::new("broken.txt", io::BufReader::new(Broken))];
        let err = merge(&config(ElementType::String, SortDirection::Ascending), cursors)
            .unwrap_err();
        assert!(matches!(err, MergeError::Io { .. }));
        assert!(err.to_string().contains("broken.txt"));
    }
}
