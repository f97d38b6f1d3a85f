use grid_astar_vis::{CellId, Editor, PathResult, Step};
use std::ops::ControlFlow;

// A front end polls for a quit request whenever the search hands back control. Here the
// "user" quits after ten frames.

fn main() {
    let mut editor = Editor::new(50, 800);
    editor.primary_click(CellId::new(0, 0));
    editor.primary_click(CellId::new(49, 49));
    let mut frames = 0;
    let result = editor
        .run_search(|_, step| {
            if step == Step::Frame {
                frames += 1;
            }
            if frames >= 10 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();
    assert_eq!(result, PathResult::Cancelled);
    println!("Cancelled after {frames} frames");
}
