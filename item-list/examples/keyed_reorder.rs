// Example: the highlight and per-item observers follow values across reorders.
use item_list::{ItemDescriptor, ItemList, ItemListOptions};

fn main() {
    let mut list: ItemList<u32> = ItemList::new("tasks", ItemListOptions::new());
    let handles =
        list.rebuild([10, 20, 30].map(|v| ItemDescriptor::new(v).with_text(format!("task {v}"))));
    let watch_20 = handles[1].observe_highlighted(&list);

    list.set_highlighted(Some(1));
    println!(
        "before: highlighted={:?} item={:?} observer={}",
        list.highlighted_index(),
        list.highlighted_item().map(|r| r.value),
        watch_20.get()
    );

    // Data reorder: 20 moves to the front. The host simply redeclares in the new order.
    list.rebuild([20, 30, 10].map(ItemDescriptor::new));
    println!(
        "after: highlighted={:?} item={:?} observer={} changed={}",
        list.highlighted_index(),
        list.highlighted_item().map(|r| r.value),
        watch_20.get(),
        watch_20.take_changed()
    );
    println!(
        "handle now at {:?} (declared at {})",
        handles[1].current_index(),
        handles[1].index()
    );
}
