use crate::scoring::Score;

pub(super) const VALUE_MARKER: char = '0';
pub(super) const AVERAGE_MARKER: char = '|';
const WIDTH: usize = 100;

/// A 100-column dash line with `marker` at the column of the rounded
/// percentage. Zero, out-of-range and undefined scores draw no marker.
pub(super) fn bar_line(score: Score, marker: char) -> String {
    let mut line = vec!['-'; WIDTH];
    if let Some(column) = score.value().and_then(marker_column) {
        line[column] = marker;
    }
    line.into_iter().collect()
}

fn marker_column(value: f64) -> Option<usize> {
    let percent = (value * 100.0).round();
    if !(1.0..=WIDTH as f64).contains(&percent) {
        return None;
    }
    Some(percent as usize - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lands_on_rounded_percentage() {
        let line = bar_line(Score::Defined(0.5), VALUE_MARKER);
        assert_eq!(line.len(), WIDTH);
        assert_eq!(line.find('0'), Some(49));

        let line = bar_line(Score::Defined(1.0), AVERAGE_MARKER);
        assert_eq!(line.find('|'), Some(99));
    }

    #[test]
    fn no_marker_without_a_column() {
        for score in [
            Score::Defined(0.0),
            Score::Defined(0.004),
            Score::Defined(1.7),
            Score::Defined(-0.2),
            Score::Undefined,
        ] {
            assert!(bar_line(score, VALUE_MARKER).chars().all(|c| c == '-'));
        }
    }
}
