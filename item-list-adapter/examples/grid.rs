// Example: calendar-style grid navigation.
use item_list::{ItemDescriptor, ItemListOptions, Key, KeyInput};
use item_list_adapter::{Controller, Pattern};

const DAYS_IN_WEEK: usize = 7;

fn main() {
    let mut c: Controller<u32> = Controller::new(
        "calendar",
        ItemListOptions::new().with_initial_highlighted_index(Some(17)),
        Pattern::Grid {
            columns: DAYS_IN_WEEK,
        },
    );
    c.list_mut().rebuild((1..=30).map(ItemDescriptor::new));

    for key in [Key::ArrowRight, Key::ArrowDown, Key::ArrowDown, Key::ArrowLeft, Key::ArrowUp] {
        c.on_key(&KeyInput::plain(key), 0);
        println!(
            "{key:?}: day={:?}",
            c.list().highlighted_item().map(|r| r.value)
        );
    }

    // Stepping past the last week clears the highlight.
    c.on_key(&KeyInput::plain(Key::ArrowDown), 0);
    c.on_key(&KeyInput::plain(Key::ArrowDown), 0);
    println!("after leaving the grid: {:?}", c.list().highlighted_index());
}
