use grid_astar_vis::{Config, Editor, Step};
use std::ops::ControlFlow;

// Replays a short editing session the way a front end would: clicks are given in pixels,
// the search is triggered and every frame is printed as text.

fn main() {
    let config = Config::from_toml_str("[grid]\nrows = 8\nwidth = 160\n").unwrap();
    let mut editor = Editor::from_config(&config);
    let clicks = [
        (10.0, 10.0),
        (150.0, 150.0),
        (70.0, 10.0),
        (70.0, 30.0),
        (70.0, 50.0),
        (70.0, 70.0),
        (70.0, 90.0),
        (70.0, 110.0),
    ];
    for pos in clicks {
        editor.primary_click_at(pos);
    }
    let mut frame = 0;
    let result = editor
        .run_search(|grid, step| {
            if step == Step::Frame {
                frame += 1;
                println!("Frame {frame}:\n{grid}");
            }
            ControlFlow::Continue(())
        })
        .unwrap();
    println!("{:?}", result);
    println!("{}", editor.grid);
}
