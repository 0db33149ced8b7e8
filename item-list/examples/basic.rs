// Example: declare a list, move the highlight and select.
use item_list::{ItemDescriptor, ItemList, ItemListOptions, ItemRecord, ListEvent, MoveOptions};

fn main() {
    let on_select = |record: &ItemRecord<&'static str>, index: usize| {
        println!("on_select: {} at {index}", record.value);
    };
    let mut list = ItemList::new(0, ItemListOptions::new().with_on_select(Some(on_select)));
    let _events = list.subscribe(|event: &ListEvent| println!("event: {event:?}"));

    let handles = list.rebuild([
        ItemDescriptor::new("apple"),
        ItemDescriptor::new("banana").with_disabled(true),
        ItemDescriptor::new("cherry"),
    ]);
    for h in &handles {
        println!(
            "declared {} at {} (disabled={})",
            h.id(),
            h.index(),
            h.is_disabled()
        );
    }

    // banana is disabled, so a single step lands on cherry.
    list.move_highlight(1, MoveOptions::CONTAIN);
    println!(
        "highlighted={:?} id={:?}",
        list.highlighted_index(),
        list.highlighted_id()
    );

    list.select_highlighted();

    // Running off the end without containment clears the highlight.
    list.move_highlight(1, MoveOptions::UNCONTAINED);
    println!("after uncontained move: {:?}", list.highlighted_index());
    println!("snapshot={:?}", list.snapshot());
}
