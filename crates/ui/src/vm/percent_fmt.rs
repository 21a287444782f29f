/// Inline style for a progress-bar fill at the given percent.
#[must_use]
pub fn progress_width_style(percent: f32) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    format!("width: {clamped:.0}%;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_is_rounded_and_clamped() {
        assert_eq!(progress_width_style(42.4), "width: 42%;");
        assert_eq!(progress_width_style(-5.0), "width: 0%;");
        assert_eq!(progress_width_style(250.0), "width: 100%;");
    }
}
