use std::cmp::Ordering;

/// Safe comparison of floating point numbers, handling NaN values
pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Create a comparator ordering items by an extracted float
pub fn float_comparator<T>(
    extractor: impl Fn(&T) -> f64,
) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| safe_float_cmp(extractor(a), extractor(b))
}

/// Item with the largest extracted float, first one wins on ties
pub fn max_by_float<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    extractor: impl Fn(&T) -> f64,
) -> Option<&'a T> {
    let comparator = float_comparator(extractor);
    items.into_iter().fold(None, |best, item| match best {
        Some(current) if comparator(item, current) != Ordering::Greater => Some(current),
        _ => Some(item),
    })
}
