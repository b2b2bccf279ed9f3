/// Constrain a value between min and max.
/// Unlike `f64::clamp` this never panics on an inverted range.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
