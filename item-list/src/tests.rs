use crate::*;

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as usize
    }

    fn gen_range_isize(&mut self, start: isize, end_exclusive: isize) -> isize {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start) as u64) as isize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn list_of(names: &[&'static str]) -> (ItemList<&'static str>, Vec<ItemHandle>) {
    let mut list = ItemList::new(0, ItemListOptions::new());
    let handles = list.rebuild(names.iter().map(|n| ItemDescriptor::new(*n)));
    (list, handles)
}

type EventLog = Rc<RefCell<Vec<ListEvent>>>;

fn record_events(list: &ItemList<&'static str>) -> (EventLog, Subscription<ListEvent>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sub = list.subscribe({
        let log = Rc::clone(&log);
        move |e| log.borrow_mut().push(*e)
    });
    (log, sub)
}

fn highlight_events(log: &RefCell<Vec<ListEvent>>) -> Vec<Option<usize>> {
    log.borrow()
        .iter()
        .filter_map(|e| match e {
            ListEvent::HighlightChanged(i) => Some(*i),
            _ => None,
        })
        .collect()
}

// Ids

#[test]
fn ids_are_derived_from_list_key() {
    let ids = ListIds::new(7);
    assert_eq!(ids.controller_id(), "controller-7");
    assert_eq!(ids.list_id(), "list-7");
    assert_eq!(ids.item_id(3), "list-7-item-3");

    let named = ListIds::new("fruits");
    assert_eq!(named.controller_id(), "controller-fruits");
    assert_eq!(named.item_id(0), "list-fruits-item-0");
}

#[test]
fn id_source_hands_out_distinct_lists() {
    let source = IdSource::starting_at(10);
    let a: ItemList<&str> = ItemList::from_source(&source, ItemListOptions::new());
    let b: ItemList<&str> = ItemList::from_source(&source, ItemListOptions::new());
    assert_eq!(a.list_id(), "list-10");
    assert_eq!(b.list_id(), "list-11");
    assert_eq!(b.controller_id(), "controller-11");
    assert_eq!(source.peek(), 12);
}

// Registry

#[test]
fn declaration_order_assigns_indices() {
    let (list, handles) = list_of(&["a", "b", "c"]);
    let indices: Vec<usize> = handles.iter().map(|h| h.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(handles[2].id(), "list-0-item-2");
    assert_eq!(list.len(), 3);
    assert_eq!(list.index_of(&"b"), Some(1));
}

#[test]
fn randomized_unique_declarations_are_indexed_in_order() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..50 {
        let count = rng.gen_range_usize(0, 40);
        let mut values: Vec<u32> = (0..count as u32).collect();
        // Shuffle so values and positions are unrelated.
        for i in (1..values.len()).rev() {
            let j = rng.gen_range_usize(0, i + 1);
            values.swap(i, j);
        }

        let mut list: ItemList<u32> = ItemList::new(0, ItemListOptions::new());
        let handles = list.rebuild(values.iter().map(|v| ItemDescriptor::new(*v)));
        assert_eq!(handles.len(), count);
        for (expected, (handle, value)) in handles.iter().zip(&values).enumerate() {
            assert_eq!(handle.index(), expected);
            assert_eq!(list.index_of(value), Some(expected));
        }
    }
}

#[test]
fn duplicate_values_collapse_into_one_record() {
    let mut list: ItemList<&str> = ItemList::new(0, ItemListOptions::new());
    list.begin_cycle();
    let first = list
        .declare_item(ItemDescriptor::new("a").with_text("first"))
        .unwrap();
    list.declare_item(ItemDescriptor::new("b")).unwrap();
    let again = list
        .declare_item(
            ItemDescriptor::new("a")
                .with_text("second")
                .with_disabled(true),
        )
        .unwrap();
    list.end_cycle();

    assert_eq!(list.len(), 2);
    assert_eq!(first.index(), 0);
    assert_eq!(again.index(), 0);
    assert!(again.is_disabled());
    let record = list.item(0).unwrap();
    assert_eq!(record.text.as_deref(), Some("second"));
    assert!(record.disabled);
}

#[test]
fn late_declaration_invalidates_the_collection() {
    let invalidations = Rc::new(Cell::new(0));
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_on_invalidate(Some({
            let invalidations = Rc::clone(&invalidations);
            move || invalidations.set(invalidations.get() + 1)
        })),
    );

    list.begin_cycle();
    list.declare_item(ItemDescriptor::new("x")).unwrap();
    list.declare_item(ItemDescriptor::new("y")).unwrap();
    list.end_cycle();
    assert!(!list.needs_redeclare());

    // "z" belongs between x and y but shows up after the pass closed.
    assert!(list.declare_item(ItemDescriptor::new("z")).is_none());
    assert!(list.needs_redeclare());
    assert_eq!(list.len(), 2);
    assert_eq!(list.index_of(&"z"), None);

    // Reported once per cycle.
    assert!(list.declare_item(ItemDescriptor::new("w")).is_none());
    assert_eq!(invalidations.get(), 1);

    let handles = list.rebuild(["x", "z", "y"].map(ItemDescriptor::new));
    assert!(!list.needs_redeclare());
    let indices: Vec<usize> = handles.iter().map(|h| h.index()).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(list.index_of(&"y"), Some(2));
}

#[test]
fn known_item_redeclared_after_close_is_refreshed() {
    let (mut list, _) = list_of(&["x", "y"]);
    let handle = list
        .declare_item(ItemDescriptor::new("y").with_disabled(true))
        .unwrap();
    assert_eq!(handle.index(), 1);
    assert!(!list.needs_redeclare());
    assert!(list.item(1).unwrap().disabled);
}

#[test]
fn registry_reports_moves_and_removals() {
    let mut registry: ItemRegistry<&str> = ItemRegistry::new(ListIds::new(0));
    registry.begin_cycle();
    assert_eq!(registry.declare(ItemDescriptor::new("a")), Declaration::Added(0));
    assert_eq!(registry.declare(ItemDescriptor::new("b")), Declaration::Added(1));
    assert_eq!(registry.declare(ItemDescriptor::new("c")), Declaration::Added(2));
    assert!(registry.end_cycle().is_empty());

    registry.begin_cycle();
    assert!(registry.is_open());
    assert_eq!(
        registry.declare(ItemDescriptor::new("c")),
        Declaration::Moved { from: 2, to: 0 }
    );
    assert_eq!(
        registry.declare(ItemDescriptor::new("a")),
        Declaration::Moved { from: 0, to: 1 }
    );
    assert_eq!(registry.end_cycle(), vec![1]);
    assert!(!registry.is_open());
    assert_eq!(registry.index_of(&"b"), None);
    assert_eq!(registry.get(0).unwrap().id, "list-0-item-0");
    assert_eq!(registry.get(1).unwrap().value, "a");

    registry.begin_cycle();
    assert_eq!(registry.declare(ItemDescriptor::new("c")), Declaration::Kept(0));
    registry.end_cycle();
    assert_eq!(registry.len(), 1);
}

// Highlight

#[test]
fn move_wraps_when_contained_and_clears_when_not() {
    let (mut list, _) = list_of(&["a", "b", "c", "d", "e"]);
    assert_eq!(list.highlighted_index(), Some(0));

    list.move_highlight(-1, MoveOptions::CONTAIN);
    assert_eq!(list.highlighted_index(), Some(4));

    list.move_highlight(1, MoveOptions::UNCONTAINED);
    assert_eq!(list.highlighted_index(), None);
}

#[test]
fn multi_step_overflow_wraps_in_one_hop() {
    let (mut list, _) = list_of(&["a", "b", "c", "d", "e"]);
    list.set_highlighted(Some(3));
    list.move_highlight(4, MoveOptions::CONTAIN);
    assert_eq!(list.highlighted_index(), Some(2));
    list.move_highlight(-13, MoveOptions::CONTAIN);
    assert_eq!(list.highlighted_index(), Some(4));
}

#[test]
fn move_from_nothing_skips_disabled_first_item() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    list.rebuild([
        ItemDescriptor::new("a").with_disabled(true),
        ItemDescriptor::new("b"),
        ItemDescriptor::new("c"),
    ]);
    assert_eq!(list.highlighted_index(), None);

    list.move_highlight(1, MoveOptions::default());
    assert_eq!(list.highlighted_index(), Some(1));

    list.move_highlight(1, MoveOptions::default());
    list.move_highlight(1, MoveOptions::default());
    // c -> (wrap) a is disabled -> b
    assert_eq!(list.highlighted_index(), Some(1));
}

#[test]
fn move_from_nothing_backwards_starts_at_last() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    list.rebuild(["a", "b", "c"].map(ItemDescriptor::new));
    list.move_highlight(-1, MoveOptions::default());
    assert_eq!(list.highlighted_index(), Some(2));
}

#[test]
fn all_disabled_and_empty_lists_resolve_to_none() {
    let mut list: ItemList<&str> = ItemList::new(0, ItemListOptions::new());
    list.move_highlight(1, MoveOptions::default());
    assert_eq!(list.highlighted_index(), None);

    list.rebuild(["a", "b", "c"].map(|v| ItemDescriptor::new(v).with_disabled(true)));
    list.move_highlight(1, MoveOptions::CONTAIN);
    assert_eq!(list.highlighted_index(), None);
    list.move_highlight(-2, MoveOptions::CONTAIN);
    assert_eq!(list.highlighted_index(), None);

    assert_eq!(next_index(Some(1), 0, true, 3, |_| true), None);
    assert_eq!(next_index(None, 1, true, 0, |_| false), None);
}

#[test]
fn move_round_trips_without_disabled_items() {
    let mut rng = Lcg::new(42);
    for _ in 0..500 {
        let count = rng.gen_range_usize(1, 20);
        let start = rng.gen_range_usize(0, count);
        let amount = rng.gen_range_isize(-30, 31);
        let there = next_index(Some(start), amount, true, count, |_| false).unwrap();
        let back = next_index(Some(there), -amount, true, count, |_| false).unwrap();
        assert_eq!(back, start, "count={count} start={start} amount={amount}");
    }
}

#[test]
fn move_never_lands_on_disabled_items() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let count = rng.gen_range_usize(1, 12);
        let mut disabled: Vec<bool> = (0..count).map(|_| rng.gen_bool()).collect();
        let keep = rng.gen_range_usize(0, count);
        disabled[keep] = false;

        let mut list: ItemList<usize> = ItemList::new(0, ItemListOptions::new());
        list.rebuild(
            (0..count).map(|i| ItemDescriptor::new(i).with_disabled(disabled[i])),
        );

        for _ in 0..20 {
            let amount = rng.gen_range_isize(-4, 5);
            let contain = rng.gen_bool();
            list.move_highlight(amount, MoveOptions { contain });
            if let Some(index) = list.highlighted_index() {
                assert!(!disabled[index], "landed on disabled {index}");
            }
        }
    }
}

#[test]
fn set_highlighted_always_emits_and_clamps_out_of_range() {
    let (mut list, _) = list_of(&["a", "b"]);
    let (log, _sub) = record_events(&list);

    list.set_highlighted(Some(1));
    list.set_highlighted(Some(1));
    list.set_highlighted(Some(9));
    assert_eq!(list.highlighted_index(), None);
    list.clear_highlight();

    assert_eq!(
        highlight_events(&log),
        vec![Some(1), Some(1), None, None]
    );
}

#[test]
fn on_highlight_receives_the_highlighted_record() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_on_highlight(Some({
            let seen = Rc::clone(&seen);
            move |record: Option<&ItemRecord<&'static str>>, index: Option<usize>| {
                seen.borrow_mut().push((record.map(|r| r.value), index));
            }
        })),
    );
    list.rebuild(["a", "b"].map(ItemDescriptor::new));
    list.set_highlighted(Some(1));
    list.clear_highlight();
    assert_eq!(*seen.borrow(), vec![(Some("b"), Some(1)), (None, None)]);
}

#[test]
fn home_and_end_skip_disabled_edges() {
    let mut list: ItemList<&str> = ItemList::new(0, ItemListOptions::new());
    list.rebuild([
        ItemDescriptor::new("a").with_disabled(true),
        ItemDescriptor::new("b"),
        ItemDescriptor::new("c"),
        ItemDescriptor::new("d").with_disabled(true),
    ]);
    list.highlight_last();
    assert_eq!(list.highlighted_index(), Some(2));
    list.highlight_first();
    assert_eq!(list.highlighted_index(), Some(1));
}

#[test]
fn initial_highlight_waits_for_first_populated_cycle() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(Some(2)),
    );
    assert_eq!(list.highlighted_index(), Some(2));
    let (log, _sub) = record_events(&list);

    list.rebuild(core::iter::empty());
    assert_eq!(list.highlighted_index(), Some(2));

    list.rebuild(["a", "b", "c"].map(ItemDescriptor::new));
    assert_eq!(list.highlighted_index(), Some(2));
    assert_eq!(list.highlighted_id().as_deref(), Some("list-0-item-2"));
    assert_eq!(highlight_events(&log), vec![Some(2)]);

    let mut short: ItemList<&str> = ItemList::new(
        1,
        ItemListOptions::new().with_initial_highlighted_index(Some(5)),
    );
    short.rebuild(["a"].map(ItemDescriptor::new));
    assert_eq!(short.highlighted_index(), None);
}

#[test]
fn highlight_follows_its_item_across_reorder() {
    let (mut list, _) = list_of(&["a", "b", "c"]);
    list.set_highlighted(Some(1));

    list.rebuild(["b", "a", "c"].map(ItemDescriptor::new));
    assert_eq!(list.highlighted_index(), Some(0));
    assert_eq!(list.highlighted_item().unwrap().value, "b");
}

#[test]
fn positional_highlight_stays_put_when_tracking_is_off() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_track_highlighted_value(false),
    );
    list.rebuild(["a", "b", "c"].map(ItemDescriptor::new));
    list.set_highlighted(Some(1));

    list.rebuild(["b", "a", "c"].map(ItemDescriptor::new));
    assert_eq!(list.highlighted_index(), Some(1));
    assert_eq!(list.highlighted_item().unwrap().value, "a");
}

#[test]
fn highlight_clears_when_its_index_disappears() {
    let (mut list, _) = list_of(&["a", "b", "c"]);
    list.set_highlighted(Some(2));
    let (log, _sub) = record_events(&list);

    list.rebuild(["a", "b"].map(ItemDescriptor::new));
    assert_eq!(list.highlighted_index(), None);
    assert_eq!(highlight_events(&log), vec![None]);
}

// Selection

#[test]
fn selecting_toggles_membership_in_a_host_set() {
    let selected: Rc<RefCell<BTreeSet<&'static str>>> = Rc::new(RefCell::new(BTreeSet::new()));
    let options = ItemListOptions::new()
        .with_selected_predicate({
            let selected = Rc::clone(&selected);
            move |v: &&'static str| selected.borrow().contains(v)
        })
        .with_on_select(Some({
            let selected = Rc::clone(&selected);
            move |record: &ItemRecord<&'static str>, _index: usize| {
                let mut set = selected.borrow_mut();
                if !set.remove(record.value) {
                    set.insert(record.value);
                }
            }
        }));
    let mut list = ItemList::new(0, options);
    list.rebuild(["apple", "orange", "pear"].map(ItemDescriptor::new));

    list.set_highlighted(Some(1));
    assert!(!list.is_selected(&"orange"));
    list.select_highlighted();
    assert!(list.is_selected(&"orange"));
    list.select_highlighted();
    assert!(!list.is_selected(&"orange"));

    list.set_highlighted(Some(2));
    list.select_highlighted();
    let handles = list.rebuild(["apple", "orange", "pear"].map(ItemDescriptor::new));
    let flags: Vec<bool> = handles.iter().map(|h| h.is_selected()).collect();
    assert_eq!(flags, vec![false, false, true]);
}

#[test]
fn selection_by_fixed_value() {
    let mut list: ItemList<&str> =
        ItemList::new(0, ItemListOptions::new().with_selected_value("b"));
    let handles = list.rebuild(["a", "b"].map(ItemDescriptor::new));
    assert!(!handles[0].is_selected());
    assert!(handles[1].is_selected());

    list.set_selection(Selection::Value("a"));
    assert!(list.is_selected(&"a"));
    assert!(!list.is_selected(&"b"));
}

#[test]
fn select_highlighted_without_highlight_is_a_no_op() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    list.rebuild(["a"].map(ItemDescriptor::new));
    let (log, _sub) = record_events(&list);
    list.select_highlighted();
    assert!(log.borrow().is_empty());
}

#[test]
fn item_handles_respect_disabled() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    let handles = list.rebuild([
        ItemDescriptor::new("a").with_disabled(true),
        ItemDescriptor::new("b"),
    ]);
    let (log, _sub) = record_events(&list);

    handles[0].highlight(&mut list);
    handles[0].select(&mut list);
    assert!(log.borrow().is_empty());

    handles[1].highlight(&mut list);
    handles[1].select(&mut list);
    assert_eq!(
        *log.borrow(),
        vec![ListEvent::HighlightChanged(Some(1)), ListEvent::Selected(1)]
    );
}

#[test]
fn handles_track_moves_and_detach_on_removal() {
    let (mut list, handles) = list_of(&["a", "b", "c"]);
    let b = handles[1].clone();

    list.rebuild(["c", "b"].map(ItemDescriptor::new));
    assert_eq!(b.index(), 1);
    assert_eq!(b.current_index(), Some(1));
    let a = &handles[0];
    assert_eq!(a.current_index(), None);

    list.clear_highlight();
    a.highlight(&mut list);
    assert_eq!(list.highlighted_index(), None);

    list.rebuild(["b", "c"].map(ItemDescriptor::new));
    assert_eq!(b.current_index(), Some(0));
    b.highlight(&mut list);
    assert_eq!(list.highlighted_index(), Some(0));
}

// Typeahead

fn fruit_list() -> ItemList<&'static str> {
    let mut list = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    list.rebuild(["Apple", "Orange", "Pear"].map(ItemDescriptor::new));
    list
}

#[test]
fn typeahead_prefix_within_window_then_after_decay() {
    let mut list = fruit_list();

    assert_eq!(
        list.highlight_by_key(&KeyInput::char('a'), 0),
        KeyOutcome::Handled
    );
    assert_eq!(list.highlighted_index(), Some(0));
    assert_eq!(
        list.highlight_by_key(&KeyInput::char('p'), 100),
        KeyOutcome::Handled
    );
    assert_eq!(list.typeahead_buffer(), "ap");
    assert_eq!(list.highlighted_index(), Some(0));

    list.highlight_by_key(&KeyInput::char('p'), 100 + DEFAULT_TYPEAHEAD_DELAY_MS + 1);
    assert_eq!(list.typeahead_buffer(), "p");
    assert_eq!(list.highlighted_index(), Some(2));
}

#[test]
fn typeahead_is_case_insensitive_and_uses_display_text() {
    let mut list: ItemList<u32> = ItemList::new(0, ItemListOptions::new());
    list.rebuild([
        ItemDescriptor::new(1).with_text("Kiwi"),
        ItemDescriptor::new(2).with_text("Mango").with_disabled(true),
        ItemDescriptor::new(3).with_text("melon"),
        ItemDescriptor::new(42),
    ]);

    list.highlight_by_key(&KeyInput::char('M'), 0);
    assert_eq!(list.highlighted_index(), Some(2));

    list.tick(1_000);
    assert_eq!(list.typeahead_buffer(), "");
    list.highlight_by_key(&KeyInput::char('4'), 1_000);
    assert_eq!(list.highlighted_index(), Some(3));
}

#[test]
fn typeahead_skips_disabled_items() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_initial_highlighted_index(None),
    );
    list.rebuild([
        ItemDescriptor::new("Apple").with_disabled(true),
        ItemDescriptor::new("Avocado"),
        ItemDescriptor::new("Banana").with_disabled(true),
    ]);

    assert!(list.highlight_by_key(&KeyInput::char('a'), 0).is_handled());
    assert_eq!(list.highlighted_index(), Some(1));

    // The only "b" item is disabled.
    assert!(list.highlight_by_key(&KeyInput::char('b'), 1_000).is_handled());
    assert_eq!(list.highlighted_index(), Some(1));
}

#[test]
fn typeahead_ignores_combinations_and_non_search_keys() {
    let mut list = fruit_list();
    let ctrl_a = KeyInput::new(
        Key::Char('a'),
        Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        },
    );
    assert_eq!(list.highlight_by_key(&ctrl_a, 0), KeyOutcome::Ignored);
    assert_eq!(
        list.highlight_by_key(&KeyInput::char('!'), 0),
        KeyOutcome::Ignored
    );
    assert_eq!(
        list.highlight_by_key(&KeyInput::plain(Key::Tab), 0),
        KeyOutcome::Ignored
    );
    assert_eq!(list.typeahead_buffer(), "");
    assert_eq!(list.highlighted_index(), None);

    let shift_o = KeyInput::new(
        Key::Char('O'),
        Modifiers {
            shift: true,
            ..Modifiers::NONE
        },
    );
    assert_eq!(list.highlight_by_key(&shift_o, 0), KeyOutcome::Handled);
    assert_eq!(list.highlighted_index(), Some(1));
}

#[test]
fn typeahead_without_match_keeps_highlight_but_consumes_key() {
    let mut list = fruit_list();
    list.set_highlighted(Some(1));
    assert_eq!(
        list.highlight_by_key(&KeyInput::char('z'), 0),
        KeyOutcome::Handled
    );
    assert_eq!(list.highlighted_index(), Some(1));
}

#[test]
fn typeahead_buffer_decays_on_tick() {
    let mut t = Typeahead::new(300);
    assert_eq!(t.push(&KeyInput::char('A'), 10), Some("a"));
    assert_eq!(t.push(&KeyInput::char('-'), 200), Some("a-"));
    t.tick(499);
    assert_eq!(t.buffer(), "a-");
    t.tick(500);
    assert_eq!(t.buffer(), "");
    assert!(!t.is_active());
}

#[test]
fn on_key_navigates_selects_and_falls_through_to_typeahead() {
    let mut list = fruit_list();
    let (log, _sub) = record_events(&list);

    assert!(list.on_key(&KeyInput::plain(Key::ArrowDown), 0).is_handled());
    assert_eq!(list.highlighted_index(), Some(0));
    list.on_key(&KeyInput::plain(Key::ArrowUp), 0);
    assert_eq!(list.highlighted_index(), Some(2));
    list.on_key(&KeyInput::plain(Key::Home), 0);
    assert_eq!(list.highlighted_index(), Some(0));
    list.on_key(&KeyInput::plain(Key::End), 0);
    assert_eq!(list.highlighted_index(), Some(2));
    list.on_key(&KeyInput::plain(Key::Enter), 0);
    assert!(log.borrow().contains(&ListEvent::Selected(2)));

    assert!(list.on_key(&KeyInput::char('o'), 10).is_handled());
    assert_eq!(list.highlighted_index(), Some(1));
    assert_eq!(
        list.on_key(&KeyInput::plain(Key::Escape), 10),
        KeyOutcome::Ignored
    );
}

// Event bus

#[test]
fn nested_emits_are_delivered_after_the_current_event() {
    let bus: EventBus<u32> = EventBus::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let _first = bus.subscribe({
        let bus = bus.clone();
        let log = Rc::clone(&log);
        move |e| {
            log.borrow_mut().push((1, *e));
            if *e == 1 {
                bus.emit(2);
            }
        }
    });
    let _second = bus.subscribe({
        let log = Rc::clone(&log);
        move |e| log.borrow_mut().push((2, *e))
    });

    bus.emit(1);
    assert_eq!(*log.borrow(), vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
}

#[test]
fn dropping_a_subscription_unsubscribes() {
    let bus: EventBus<u32> = EventBus::new();
    let hits = Rc::new(Cell::new(0));
    let sub = bus.subscribe({
        let hits = Rc::clone(&hits);
        move |_| hits.set(hits.get() + 1)
    });
    bus.emit(0);
    assert_eq!(bus.subscriber_count(), 1);
    sub.unsubscribe();
    bus.emit(0);
    assert_eq!(hits.get(), 1);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn list_emits_index_updates_for_added_moved_and_removed_items() {
    let (mut list, _) = list_of(&["a", "b", "c"]);
    let (log, _sub) = record_events(&list);

    list.rebuild(["c", "a", "d"].map(ItemDescriptor::new));
    let updates: Vec<(Option<usize>, Option<usize>)> = log
        .borrow()
        .iter()
        .filter_map(|e| match *e {
            ListEvent::ItemIndexUpdated { from, to } => Some((from, to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        updates,
        vec![
            (Some(2), Some(0)),
            (Some(0), Some(1)),
            (None, Some(2)),
            (Some(1), None),
        ]
    );
}

// Observers

#[test]
fn only_affected_item_observers_change() {
    let (mut list, handles) = list_of(&["a", "b", "c"]);
    list.clear_highlight();
    let observers: Vec<HighlightedObserver> = handles
        .iter()
        .map(|h| h.observe_highlighted(&list))
        .collect();
    let changed = |observers: &[HighlightedObserver]| -> Vec<bool> {
        observers.iter().map(|o| o.take_changed()).collect()
    };

    list.set_highlighted(Some(1));
    assert_eq!(changed(&observers), vec![false, true, false]);
    assert!(observers[1].get());

    list.set_highlighted(Some(2));
    assert_eq!(changed(&observers), vec![false, true, true]);
    assert!(!observers[1].get());
    assert!(observers[2].get());

    list.set_highlighted(Some(2));
    assert_eq!(changed(&observers), vec![false, false, false]);
}

#[test]
fn observers_follow_their_item_through_reorders() {
    let mut list: ItemList<&str> = ItemList::new(
        0,
        ItemListOptions::new().with_track_highlighted_value(false),
    );
    let handles = list.rebuild(["a", "b", "c"].map(ItemDescriptor::new));
    list.set_highlighted(Some(1));
    let flips = Rc::new(RefCell::new(Vec::new()));
    let a = list.observe_highlighted_with(&handles[0], {
        let flips = Rc::clone(&flips);
        move |h| flips.borrow_mut().push(('a', h))
    });
    let b = handles[1].observe_highlighted(&list);
    assert!(b.get());

    // Positional highlight stays at 1, which is now "a".
    list.rebuild(["b", "a", "c"].map(ItemDescriptor::new));
    assert!(a.get());
    assert!(!b.get());
    assert_eq!(*flips.borrow(), vec![('a', true)]);
}

#[test]
fn tracked_reorder_does_not_flicker_observers() {
    let (mut list, handles) = list_of(&["a", "b", "c"]);
    assert_eq!(list.highlighted_index(), Some(0));
    let flips = Rc::new(RefCell::new(Vec::new()));
    let a = list.observe_highlighted_with(&handles[0], {
        let flips = Rc::clone(&flips);
        move |h| flips.borrow_mut().push(('a', h))
    });
    let b = list.observe_highlighted_with(&handles[1], {
        let flips = Rc::clone(&flips);
        move |h| flips.borrow_mut().push(('b', h))
    });

    // "a" keeps the highlight while it moves to index 1.
    list.rebuild(["b", "a", "c"].map(ItemDescriptor::new));
    assert_eq!(list.highlighted_index(), Some(1));
    assert!(a.get());
    assert!(!b.get());
    assert!(!a.take_changed());
    assert!(!b.take_changed());
    assert!(flips.borrow().is_empty());
}

#[test]
fn highlighted_id_observer_sees_the_initial_highlight_settle() {
    let mut list: ItemList<&str> = ItemList::new(0, ItemListOptions::new());
    let id = list.observe_highlighted_id();
    assert_eq!(id.get(), None);

    list.rebuild(["a", "b"].map(ItemDescriptor::new));
    assert_eq!(id.get().as_deref(), Some("list-0-item-0"));
    assert_eq!(id.get(), list.highlighted_id());
}

#[test]
fn highlighted_id_observer_tracks_active_descendant() {
    let (mut list, _) = list_of(&["a", "b", "c"]);
    let id = list.observe_highlighted_id();
    assert_eq!(id.get().as_deref(), Some("list-0-item-0"));

    list.move_highlight(2, MoveOptions::default());
    assert_eq!(id.get().as_deref(), Some("list-0-item-2"));

    list.clear_highlight();
    assert_eq!(id.get(), None);
}

// Snapshots

#[test]
fn item_states_expose_aria_facts() {
    let mut list: ItemList<&str> =
        ItemList::new("menu", ItemListOptions::new().with_selected_value("c"));
    list.rebuild([
        ItemDescriptor::new("a"),
        ItemDescriptor::new("b").with_disabled(true),
        ItemDescriptor::new("c"),
    ]);
    let states = list.item_states();
    assert_eq!(
        states[1],
        ItemState {
            id: String::from("list-menu-item-1"),
            index: 1,
            highlighted: false,
            selected: false,
            disabled: true,
        }
    );
    assert!(states[0].highlighted);
    assert!(states[2].selected);

    let snapshot = list.snapshot();
    assert_eq!(snapshot.controller_id, "controller-menu");
    assert_eq!(snapshot.highlighted_id.as_deref(), Some("list-menu-item-0"));
    assert_eq!(snapshot.item_count, 3);

    list.set_highlighted(Some(2));
    list.restore_highlight(&snapshot);
    assert_eq!(list.highlighted_index(), Some(0));
}

// Scrolling

#[derive(Debug, Default)]
struct FakeNode {
    parent: Option<usize>,
    root: bool,
    // Offset of the node's top inside its parent's content.
    offset: i64,
    height: u32,
    content_height: u64,
    scroll: u64,
}

#[derive(Debug, Default)]
struct FakeDom {
    nodes: Vec<FakeNode>,
}

impl FakeDom {
    /// Root (0) > list container (1, 100 tall, scrolled) > `rows` rows of 20.
    fn with_rows(rows: usize) -> Self {
        let mut nodes = vec![
            FakeNode {
                root: true,
                height: 1_000,
                content_height: 1_000,
                ..FakeNode::default()
            },
            FakeNode {
                parent: Some(0),
                offset: 100,
                height: 100,
                content_height: rows as u64 * 20,
                ..FakeNode::default()
            },
        ];
        for i in 0..rows {
            nodes.push(FakeNode {
                parent: Some(1),
                offset: i as i64 * 20,
                height: 20,
                content_height: 20,
                ..FakeNode::default()
            });
        }
        Self { nodes }
    }
}

impl ScrollHost for FakeDom {
    type Element = usize;

    fn parent(&self, element: &usize) -> Option<usize> {
        self.nodes[*element].parent
    }

    fn is_root(&self, element: &usize) -> bool {
        self.nodes[*element].root
    }

    fn content_height(&self, element: &usize) -> u64 {
        self.nodes[*element].content_height
    }

    fn visible_height(&self, element: &usize) -> u32 {
        self.nodes[*element].height
    }

    fn scroll_offset(&self, element: &usize) -> u64 {
        self.nodes[*element].scroll
    }

    fn top(&self, element: &usize) -> i64 {
        let node = &self.nodes[*element];
        match node.parent {
            None => 0,
            Some(parent) => {
                self.top(&parent) + node.offset - self.nodes[parent].scroll as i64
            }
        }
    }

    fn height(&self, element: &usize) -> u32 {
        self.nodes[*element].height
    }

    fn set_scroll_offset(&mut self, element: &usize, offset: u64) {
        self.nodes[*element].scroll = offset;
    }
}

#[test]
fn scroll_offset_aligns_to_the_nearest_edge() {
    // Below the window: bottom aligned.
    assert_eq!(scroll_offset_into_view(100, 0, 200, 350, 30), Some(80));
    // Above the window: top aligned.
    assert_eq!(scroll_offset_into_view(100, 100, 200, 50, 30), Some(50));
    // Fully visible.
    assert_eq!(scroll_offset_into_view(100, 0, 200, 150, 30), None);
}

#[test]
fn closest_scroll_container_skips_non_overflowing_ancestors() {
    let mut dom = FakeDom::with_rows(3);
    // 3 rows fit into the 100-tall container, so the root is the container.
    let container = closest_scroll_container(&dom, &2).unwrap();
    assert_eq!(container.element, 0);
    assert_eq!(container.window_top, 0);

    dom.nodes[1].content_height = 500;
    assert_eq!(closest_scroll_container(&dom, &2).unwrap().element, 1);

    // An overflowing item is not its own container.
    dom.nodes[2].content_height = 200;
    assert_eq!(closest_scroll_container(&dom, &2).unwrap().element, 1);

    dom.nodes[0].root = false;
    dom.nodes[1].content_height = 60;
    assert!(closest_scroll_container(&dom, &2).is_none());
    assert_eq!(scroll_into_view(&mut dom, &2), None);
}

#[test]
fn highlight_changes_scroll_the_item_into_view() {
    let dom = Rc::new(RefCell::new(FakeDom::with_rows(10)));
    let mut list: ItemList<usize, usize> = ItemList::new(0, ItemListOptions::new());
    list.set_scroll_synchronizer(ScrollSynchronizer::new(Rc::clone(&dom)));
    list.rebuild((0..10).map(|i| ItemDescriptor::new(i).with_element(i + 2)));

    list.set_highlighted(Some(7));
    assert_eq!(dom.borrow().nodes[1].scroll, 60);

    // Already visible: untouched.
    list.set_highlighted(Some(5));
    assert_eq!(dom.borrow().nodes[1].scroll, 60);

    list.move_highlight(-5, MoveOptions::default());
    assert_eq!(list.highlighted_index(), Some(0));
    assert_eq!(dom.borrow().nodes[1].scroll, 0);
}

#[test]
fn items_without_elements_do_not_scroll() {
    let calls = Rc::new(Cell::new(0));
    let mut list: ItemList<&str, u8> = ItemList::new(0, ItemListOptions::new());
    list.set_scroll_synchronizer({
        let calls = Rc::clone(&calls);
        move |_: &u8| -> Option<u64> {
            calls.set(calls.get() + 1);
            None
        }
    });
    list.rebuild([
        ItemDescriptor::new("a"),
        ItemDescriptor::new("b").with_element(1),
    ]);
    list.set_highlighted(Some(0));
    list.set_highlighted(Some(1));
    list.clear_highlight();
    assert_eq!(calls.get(), 1);
}
