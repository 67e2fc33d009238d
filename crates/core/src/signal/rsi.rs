/// Relative Strength Index of the most recent close, using simple moving
/// averages of gains and losses over `window` periods.
///
/// The first close has no predecessor; its change counts as zero, so at
/// least `window` closes are needed. Returns `None` when there is not
/// enough data or when the window saw no movement at all.
pub fn relative_strength_index(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }

    let start = closes.len() - window;
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in start..closes.len() {
        let delta = if i == 0 { 0.0 } else { closes[i] - closes[i - 1] };
        if delta > 0.0 {
            gain_sum += delta;
        } else if delta < 0.0 {
            loss_sum -= delta;
        }
    }

    let avg_gain = gain_sum / window as f64;
    let avg_loss = loss_sum / window as f64;

    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { None } else { Some(100.0) };
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - 100.0 / (1.0 + rs);
    rsi.is_finite().then_some(rsi)
}
