//! Sticky table demo.
//!
//! A long table whose header stays at the top of the screen while its rows
//! scroll by, plus a footer note that sticks to the bottom edge.
//!
//! Run with: cargo run --example sticky_table
//! Keys: j/k or arrows to scroll, PageUp/PageDown, Home/End, q to quit.

use std::io;

use spark_sticky::{Page, Sticker, StickyConfig, StickyError};

fn build(page: &mut Page, sticker: &mut Sticker) -> Result<(), StickyError> {
    let body = page.body();

    page.block(body, "Inventory\n=========")?;
    let intro = page.block(body, "Scroll down: the table header follows you\nuntil the table is gone.")?;
    page.set_margin_top(intro, 1.0);

    let rows: Vec<Vec<String>> = (1..=60)
        .map(|n| {
            vec![
                n.to_string(),
                format!("item-{n:03}"),
                format!("{}", (n * 37) % 500),
                if n % 3 == 0 { "backorder" } else { "in stock" }.to_string(),
            ]
        })
        .collect();
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect())
        .collect();

    let table = page.table(body, &["ID", "Name", "Qty", "Status"], &rows)?;
    page.set_margin_top(table.table, 1.0);
    sticker.register(page, table.head, StickyConfig::top())?;

    let section = page.block(body, "Notes")?;
    page.set_margin_top(section, 2.0);
    let notes = page.block(body, &"Lorem ipsum dolor sit amet.\n".repeat(30))?;
    sticker.register(page, section, StickyConfig::top().with_container(notes))?;

    let footer = page.block(body, "-- end of report --")?;
    sticker.register(page, footer, StickyConfig::bottom())?;

    Ok(())
}

fn main() -> io::Result<()> {
    let mut page = Page::new(80, 24);
    let mut sticker = Sticker::new();
    build(&mut page, &mut sticker).map_err(io::Error::other)?;

    spark_sticky::pipeline::run(&mut page, &mut sticker)?;

    sticker.dispatch_named(&mut page, "destroy").map_err(io::Error::other)?;
    Ok(())
}
