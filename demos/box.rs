//! Box Example - Child list sync, orientation and layout
//!
//! This example demonstrates:
//! - Building nested boxes from props (with a conditionally omitted child)
//! - Appending, prepending and removing children
//! - Flipping orientation and re-running layout
//! - Loading data on a background thread
//!
//! Run with: cargo run --example box

use std::error::Error;
use std::sync::mpsc;

use spark_widgets::{
    compute_layout, run_in_thread, BaseProps, BoxProps, ComputedLayout, Label, LabelProps,
    LayoutBox, Widget,
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== spark-widgets Box Example ===\n");

    // Work off the UI thread, results come back over a channel
    let (tx, rx) = mpsc::channel();
    let load = run_in_thread(move |count: usize| {
        let items: Vec<String> = (1..=count).map(|i| format!("item {i}")).collect();
        let _ = tx.send(items);
    });
    load(3)?;
    let items = rx.recv()?;

    let show_status = false;
    let title = Label::new(LabelProps {
        text: "Inbox".to_string(),
        base: BaseProps {
            name: Some("title".to_string()),
            hexpand: true,
            ..Default::default()
        },
    });
    let status = show_status.then(|| Label::with_text("offline").widget());

    let header = LayoutBox::new(BoxProps {
        children: vec![Some(title.widget()), status, Some(Label::with_text("[x]").widget())],
        spacing: 1,
        base: BaseProps {
            name: Some("header".to_string()),
            ..Default::default()
        },
        ..Default::default()
    })?;

    let mut list = LayoutBox::new(BoxProps {
        vertical: true,
        base: BaseProps {
            name: Some("list".to_string()),
            vexpand: true,
            ..Default::default()
        },
        ..Default::default()
    })?;
    for item in &items {
        list.append(&Label::with_text(item.as_str()))?;
    }
    list.prepend(&Label::with_text("-- today --"))?;

    let mut root = LayoutBox::new(BoxProps {
        children: vec![Some(header.widget()), Some(list.widget())],
        vertical: true,
        base: BaseProps {
            name: Some("root".to_string()),
            ..Default::default()
        },
        ..Default::default()
    })?;

    println!("Widget hierarchy:");
    print_hierarchy(root.widget(), 0);

    println!("\nLayout (40x10):");
    print_layout(root.widget(), 40, 10)?;

    // Drop the last item and lay out horizontally
    if let Some(&last) = list.children().last() {
        list.remove(&last)?;
        last.destroy()?;
    }
    root.set_vertical(false);
    root.append(&Label::with_text("footer"))?;

    println!("\nAfter removing an item and switching root to horizontal:");
    print_layout(root.widget(), 40, 10)?;

    println!("\n=== Box Example Complete ===");
    Ok(())
}

fn print_hierarchy(widget: Widget, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{}[{}] {:?} {:?}", indent, widget.index(), widget.kind(), widget.name().unwrap_or_default());

    for child in widget.children() {
        print_hierarchy(child, depth + 1);
    }
}

fn print_layout(root: Widget, width: u16, height: u16) -> Result<(), Box<dyn Error>> {
    let layout = compute_layout(root, width, height)?;
    print_allocations(root, &layout, 0);
    Ok(())
}

fn print_allocations(widget: Widget, layout: &ComputedLayout, depth: usize) {
    if let Some(a) = layout.get(widget) {
        let indent = "  ".repeat(depth);
        println!(
            "{}{:?} {:?} at ({}, {}) size {}x{}",
            indent,
            widget.kind(),
            widget.name().unwrap_or_default(),
            a.x,
            a.y,
            a.width,
            a.height
        );
    }
    for child in widget.children() {
        print_allocations(child, layout, depth + 1);
    }
}
