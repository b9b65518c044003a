//! Array slice index arithmetic

/// Indices selected by `[start:end:step]` on an array of `len` elements
///
/// `step` defaults to 1 and a zero step selects nothing. Negative bounds
/// count from the end. Bounds are clamped to `[0, len]` for a positive step
/// and to `[-1, len - 1]` for a negative one. All arithmetic saturates, so
/// extreme bounds and steps are safe.
#[must_use]
pub fn slice_indices(len: usize, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<usize> {
    let step = step.unwrap_or(1);
    if step == 0 {
        return Vec::new();
    }
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let normalize = |bound: i64| if bound >= 0 { bound } else { len.saturating_add(bound) };

    let mut indices = Vec::new();
    if step > 0 {
        let mut lower = normalize(start.unwrap_or(0)).clamp(0, len);
        let upper = normalize(end.unwrap_or(len)).clamp(0, len);
        while lower < upper {
            indices.extend(usize::try_from(lower).ok());
            lower = lower.saturating_add(step);
        }
    } else {
        let mut upper = normalize(start.unwrap_or(len - 1)).clamp(-1, len - 1);
        let lower = normalize(end.unwrap_or(-len - 1)).clamp(-1, len - 1);
        while lower < upper {
            indices.extend(usize::try_from(upper).ok());
            upper = upper.saturating_add(step);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_select_everything() {
        assert_eq!(slice_indices(4, None, None, None), vec![0, 1, 2, 3]);
        assert_eq!(slice_indices(4, None, None, Some(-1)), vec![3, 2, 1, 0]);
        assert!(slice_indices(0, None, None, None).is_empty());
        assert!(slice_indices(0, None, None, Some(-1)).is_empty());
    }

    #[test]
    fn positive_steps() {
        assert_eq!(slice_indices(10, Some(1), Some(3), None), vec![1, 2]);
        assert_eq!(slice_indices(10, Some(1), Some(5), Some(2)), vec![1, 3]);
        assert_eq!(slice_indices(10, Some(-3), None, None), vec![7, 8, 9]);
        assert_eq!(slice_indices(10, Some(-20), Some(2), None), vec![0, 1]);
        assert!(slice_indices(10, Some(5), Some(1), None).is_empty());
    }

    #[test]
    fn negative_steps() {
        assert_eq!(slice_indices(10, Some(5), Some(1), Some(-2)), vec![5, 3]);
        assert_eq!(slice_indices(3, Some(-1), None, Some(-1)), vec![2, 1, 0]);
        assert_eq!(slice_indices(10, Some(20), Some(7), Some(-1)), vec![9, 8]);
        assert!(slice_indices(10, Some(1), Some(5), Some(-1)).is_empty());
    }

    #[test]
    fn zero_step_selects_nothing() {
        assert!(slice_indices(5, None, None, Some(0)).is_empty());
    }

    #[test]
    fn extreme_values_saturate() {
        assert_eq!(slice_indices(3, Some(i64::MIN), Some(i64::MAX), None), vec![0, 1, 2]);
        assert_eq!(slice_indices(3, None, None, Some(i64::MAX)), vec![0]);
        assert_eq!(slice_indices(3, None, None, Some(i64::MIN)), vec![2]);
        assert_eq!(slice_indices(3, Some(i64::MAX), Some(i64::MIN), Some(-1)), vec![2, 1, 0]);
    }
}
