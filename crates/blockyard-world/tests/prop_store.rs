use blockyard_world::{GridPos, MemoryStore, Texture, ViewMode, WORLD_KEY, WorldStore, KvStore};
use proptest::prelude::*;

fn arb_pos() -> impl Strategy<Value = GridPos> {
    (-4i32..4, -2i32..3, -4i32..4)
}

fn arb_texture() -> impl Strategy<Value = Texture> {
    prop::sample::select(Texture::ALL.to_vec())
}

fn empty_store() -> WorldStore<MemoryStore> {
    let mut mem = MemoryStore::new();
    mem.set(WORLD_KEY, "[]").unwrap();
    WorldStore::load(mem)
}

fn multiset(store: &WorldStore<MemoryStore>) -> Vec<(GridPos, Texture)> {
    let mut v: Vec<(GridPos, Texture)> = store
        .cubes()
        .iter()
        .map(|c| (c.position, c.texture))
        .collect();
    v.sort();
    v
}

proptest! {
    // Every add appends exactly one cube, duplicates included
    #[test]
    fn add_count_equals_calls(adds in prop::collection::vec(arb_pos(), 0..40)) {
        let mut store = empty_store();
        for &(x, y, z) in &adds {
            store.add_cube(x, y, z);
        }
        prop_assert_eq!(store.cubes().len(), adds.len());
    }

    // remove_cube clears exactly the cubes at that coordinate and nothing else
    #[test]
    fn remove_is_exact(adds in prop::collection::vec(arb_pos(), 0..40), target in arb_pos()) {
        let mut store = empty_store();
        for &(x, y, z) in &adds {
            store.add_cube(x, y, z);
        }
        let before: Vec<GridPos> = store.cubes().iter().map(|c| c.position).collect();
        let (tx, ty, tz) = target;
        store.remove_cube(tx, ty, tz);
        let expected: Vec<GridPos> = before.into_iter().filter(|p| *p != target).collect();
        let after: Vec<GridPos> = store.cubes().iter().map(|c| c.position).collect();
        prop_assert_eq!(after, expected);
    }

    // save then load reproduces the (position, texture) multiset
    #[test]
    fn save_load_roundtrip(edits in prop::collection::vec((arb_pos(), arb_texture()), 0..30)) {
        let mut store = empty_store();
        for &((x, y, z), t) in &edits {
            store.set_texture(t);
            store.add_cube(x, y, z);
        }
        store.save_world();
        let expected = multiset(&store);
        let reloaded = WorldStore::load(store.into_storage());
        prop_assert_eq!(multiset(&reloaded), expected);
    }

    // reset wipes memory and storage; the next load is the demo layout
    #[test]
    fn reset_then_load_seeds_demo(adds in prop::collection::vec(arb_pos(), 0..20)) {
        let mut store = empty_store();
        for &(x, y, z) in &adds {
            store.add_cube(x, y, z);
        }
        store.save_world();
        store.reset_world();
        prop_assert!(store.cubes().is_empty());
        prop_assert_eq!(store.storage().get(WORLD_KEY).unwrap(), None);
        let reloaded = WorldStore::load(store.into_storage());
        let demo = WorldStore::load(MemoryStore::new());
        prop_assert_eq!(multiset(&reloaded), multiset(&demo));
    }

    // toggle_view_mode is an involution
    #[test]
    fn toggle_twice_is_identity(pre in 0usize..3) {
        let mut store = empty_store();
        for _ in 0..pre {
            store.toggle_view_mode();
        }
        let start = store.view_mode();
        store.toggle_view_mode();
        prop_assert_ne!(store.view_mode(), start);
        store.toggle_view_mode();
        prop_assert_eq!(store.view_mode(), start);
    }
}

#[test]
fn view_mode_starts_first_person() {
    assert_eq!(empty_store().view_mode(), ViewMode::FirstPerson);
}
