//! Example: Driving an editing session programmatically
//!
//! This example demonstrates a full editor session without a UI: placing
//! nodes, dragging with pointer gestures, connecting, undoing, and finally
//! exporting and saving the diagram.

use vellum::{
    DiagramEditor,
    canvas::ToolMode,
    geometry::Point,
    persistence::{DiagramStore, MemoryStore},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let mut editor = DiagramEditor::default();
    editor.set_title("Platform Architecture");

    println!("Placing nodes...");
    let client = editor.add_node("webapp", Some(Point::new(100.0, 100.0)));
    let server = editor.add_node("server", Some(Point::new(340.0, 100.0)));
    let database = editor.add_node("database", Some(Point::new(340.0, 260.0)));

    // Drag the client node 80px to the right with a pointer gesture
    println!("Dragging {client}...");
    editor.press(Point::new(110.0, 110.0));
    editor.motion(Point::new(150.0, 110.0));
    editor.motion(Point::new(190.0, 110.0));
    editor.release(Point::new(190.0, 110.0));

    // Draw connections with the connect tool
    println!("Connecting nodes...");
    editor.set_tool(ToolMode::Connect);
    editor.press(Point::new(190.0, 110.0));
    editor.release(Point::new(350.0, 110.0));
    editor
        .connect(&server, &database)
        .expect("both endpoints exist");

    println!("Nodes: {}", editor.canvas().graph().node_count());
    println!("Connections: {}", editor.canvas().graph().connection_count());

    // Undo the last connection, then bring it back
    editor.undo();
    println!(
        "After undo: {} connections",
        editor.canvas().graph().connection_count()
    );
    editor.redo();

    // Export to SVG
    let svg = editor.export_svg();
    let svg_path = editor.file_name("svg");
    std::fs::write(&svg_path, &svg)?;
    println!("SVG written to: {svg_path} ({} bytes)", svg.len());

    // Export to PDF
    let pdf = editor.export_pdf()?;
    let pdf_path = editor.file_name("pdf");
    std::fs::write(&pdf_path, &pdf)?;
    println!("PDF written to: {pdf_path} ({} bytes)", pdf.len());

    // Save through the persistence contract
    let mut store = MemoryStore::new();
    let diagram_id = editor.save_to(&mut store, "demo-project")?;
    println!("Saved as {diagram_id}");

    for summary in store.list("demo-project")? {
        println!("  stored: {} ({})", summary.title, summary.id);
    }

    // Reload the saved blob into a fresh editor
    let blob = store.graph(&diagram_id).expect("blob was just stored");
    let mut reloaded = DiagramEditor::default();
    reloaded.load_json(blob)?;
    println!(
        "Reloaded '{}' with {} nodes",
        reloaded.title(),
        reloaded.canvas().graph().node_count()
    );

    Ok(())
}
