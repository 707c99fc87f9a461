use gridsent_engine::CellCounter;
use gridsent_grid::GridIndex;

/// Render the final table: one row per grid cell in load order, totals
/// right-aligned and scores carrying an explicit sign.
pub fn render(grid: &GridIndex, counter: &CellCounter) -> String {
    let mut out = String::from("Cell #Total Tweets #Overall Sentiment Score\n");
    for name in grid.names() {
        let tally = counter.get(name);
        out.push_str(&format!(
            "{} {:13} {:+23}\n",
            name, tally.total, tally.score
        ));
    }
    out
}
