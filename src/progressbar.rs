use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

pub fn new() -> MultiProgress {
    MultiProgress::new()
}

pub fn spinner() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold.dim} {spinner} {wide_msg}")
        .expect("static template")
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

/// Spinner counting received bytes, for bodies of unknown length.
pub fn bytes() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold.dim} {spinner} {bytes:>10} {wide_msg}")
        .expect("static template")
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

pub fn counter() -> ProgressStyle {
    ProgressStyle::with_template("{prefix:.bold.dim} {spinner} [{pos}/{len}] {wide_msg}")
        .expect("static template")
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
}

/// Add a step bar to `mp`, labelled `[step/total]` like the rest of the run.
pub fn step(mp: &MultiProgress, style: ProgressStyle, step: usize, total: usize) -> ProgressBar {
    let pb = mp.add(ProgressBar::new_spinner());
    pb.set_style(style);
    pb.set_prefix(format!("[{step}/{total}]"));
    pb
}
