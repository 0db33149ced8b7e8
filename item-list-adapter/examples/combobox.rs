// Example: a combobox whose results are filtered by the input text.
use item_list::{ItemDescriptor, ItemListOptions, ItemRecord, Key, KeyInput};
use item_list_adapter::{Controller, Pattern};

const FRUITS: [&str; 6] = ["Apple", "Apricot", "Banana", "Blueberry", "Cherry", "Grape"];

fn render(c: &mut Controller<&'static str>, query: &str) {
    let query = query.to_lowercase();
    let list = c.list_mut();
    list.begin_cycle();
    for fruit in FRUITS {
        if fruit.to_lowercase().contains(&query) {
            list.declare_item(ItemDescriptor::new(fruit));
        }
    }
    list.end_cycle();
}

fn main() {
    let mut c = Controller::new(
        0,
        ItemListOptions::new().with_on_select(Some(|record: &ItemRecord<&'static str>, _: usize| {
            println!("selected {}", record.value);
        })),
        Pattern::Combobox,
    );

    let mut query = String::new();
    for typed in ['a', 'p'] {
        // Printable keys are not handled: they belong to the text input.
        let outcome = c.on_key(&KeyInput::char(typed), 0);
        query.push(typed);
        render(&mut c, &query);
        c.reset_on_input_change();
        println!(
            "query={query:?} {outcome:?} results={:?} active={:?}",
            c.list().items().iter().map(|r| r.value).collect::<Vec<_>>(),
            c.list().highlighted_id()
        );
    }

    c.on_key(&KeyInput::plain(Key::ArrowDown), 0);
    c.on_key(&KeyInput::plain(Key::Enter), 0);
}
