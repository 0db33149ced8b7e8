// Example: typeahead search with host-driven time.
use item_list::{ItemDescriptor, ItemList, ItemListOptions, KeyInput};

fn main() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    list.rebuild(["Apple", "Apricot", "Orange", "Pear"].map(ItemDescriptor::new));

    // `now_ms` comes from the host clock (frame time, Instant, a test counter...).
    for (c, now_ms) in [('a', 0), ('p', 80), ('r', 160), ('p', 900)] {
        let outcome = list.on_key(&KeyInput::char(c), now_ms);
        println!(
            "t={now_ms:>4} key={c:?} {outcome:?} buffer={:?} highlighted={:?}",
            list.typeahead_buffer(),
            list.highlighted_item().map(|r| r.value)
        );
    }

    list.tick(2_000);
    println!("after tick: buffer={:?}", list.typeahead_buffer());
}
