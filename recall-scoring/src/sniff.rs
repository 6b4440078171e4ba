//! Best-effort field separator detection.
//!
//! Trial tables come from spreadsheets and hand-edited files, so the
//! separator varies. The detector looks at a leading window of the text and
//! picks the candidate whose per-line count is the most consistent.
//!
//! Detection never fails loudly: when no candidate is consistent enough the
//! caller gets `None` and uses its fallback separator.

/// Separators considered, in no particular order.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'|', b'\t'];

/// Preference order when several candidates are equally consistent.
const PREFERRED: [u8; 3] = [b',', b'\t', b';'];

/// Default size of the sample window, in characters.
pub const DEFAULT_SNIFF_CHARS: usize = 2048;

/// Lines examined per round before the tables are evaluated.
const CHUNK_LINES: usize = 10;

const START_CONSISTENCY: f64 = 1.0;
const MIN_CONSISTENCY: f64 = 0.9;
const CONSISTENCY_STEP: f64 = 0.01;

/// Per-candidate histogram: occurrences-per-line -> number of lines.
#[derive(Debug, Default)]
struct Histogram {
    counts: Vec<(usize, usize)>,
}

impl Histogram {
    fn record(&mut self, occurrences: usize) {
        match self.counts.iter_mut().find(|(value, _)| *value == occurrences) {
            Some((_, lines)) => *lines += 1,
            None => self.counts.push((occurrences, 1)),
        }
    }

    /// Modal per-line count, with its support reduced by every line that
    /// disagrees. `None` if the candidate never appears.
    fn mode(&self) -> Option<(usize, i64)> {
        if let [(0, _)] = self.counts.as_slice() {
            return None;
        }
        // Ties go to the value seen first.
        let (value, lines) = self
            .counts
            .iter()
            .copied()
            .reduce(|best, next| if next.1 > best.1 { next } else { best })?;
        let others: usize = self
            .counts
            .iter()
            .filter(|(v, _)| *v != value)
            .map(|(_, l)| l)
            .sum();
        Some((value, lines as i64 - others as i64))
    }
}

/// Guess the separator from the first `window` characters of `text`.
#[must_use]
pub fn sniff_delimiter(text: &str, window: usize) -> Option<u8> {
    let sample: String = text.chars().take(window).collect();
    let lines: Vec<&str> = sample.split('\n').filter(|line| !line.is_empty()).collect();
    if lines.is_empty() {
        return None;
    }

    let mut histograms: Vec<Histogram> = CANDIDATE_DELIMITERS
        .iter()
        .map(|_| Histogram::default())
        .collect();

    let mut seen = 0;
    for chunk in lines.chunks(CHUNK_LINES) {
        for line in chunk {
            for (delimiter, histogram) in CANDIDATE_DELIMITERS.iter().zip(histograms.iter_mut()) {
                let occurrences = line.bytes().filter(|b| b == delimiter).count();
                histogram.record(occurrences);
            }
        }
        seen += chunk.len();

        if let Some(delimiter) = pick_consistent(&histograms, seen) {
            return Some(delimiter);
        }
    }

    None
}

fn pick_consistent(histograms: &[Histogram], lines: usize) -> Option<u8> {
    let modes: Vec<(u8, usize, i64)> = CANDIDATE_DELIMITERS
        .iter()
        .zip(histograms)
        .filter_map(|(d, h)| h.mode().map(|(value, support)| (*d, value, support)))
        .collect();

    let total = lines as f64;
    let mut consistency = START_CONSISTENCY;
    let mut qualified: Vec<(u8, usize, i64)> = Vec::new();
    while qualified.is_empty() && consistency >= MIN_CONSISTENCY {
        qualified = modes
            .iter()
            .copied()
            .filter(|(_, value, support)| {
                *value > 0 && *support > 0 && *support as f64 / total >= consistency
            })
            .collect();
        consistency -= CONSISTENCY_STEP;
    }

    match qualified.as_slice() {
        [] => None,
        [(delimiter, _, _)] => Some(*delimiter),
        several => PREFERRED
            .iter()
            .find(|d| several.iter().any(|(q, _, _)| q == *d))
            .copied()
            .or_else(|| {
                several
                    .iter()
                    .max_by_key(|(_, value, support)| (*support, *value))
                    .map(|(d, _, _)| *d)
            }),
    }
}
