use boxtree::{BBox, RTree};
use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_hc::Hc128Rng;

type Seed = [u8; 32];

const SEED_1: &Seed = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
const SEED_2: &Seed = b"4KbTVjPT4DXSwWAsQM5dkWWywPKZRfCX";

type Rect = (f64, f64, f64, f64);

fn to_bbox(r: &Rect) -> BBox {
    BBox::new(r.0, r.1, r.2, r.3)
}

fn random_rectangles(count: usize, seed: &Seed) -> Vec<Rect> {
    let mut rng = Hc128Rng::from_seed(*seed);
    let coord = Uniform::from(0.0..1000.0);
    let size = Uniform::from(0.1..5.0);
    (0..count)
        .map(|_| {
            let x = rng.sample(coord);
            let y = rng.sample(coord);
            (x, y, x + rng.sample(size), y + rng.sample(size))
        })
        .collect()
}

fn brute_force_search<'a>(items: &'a [Rect], query: &BBox) -> Vec<&'a Rect> {
    items.iter().filter(|item| to_bbox(item).intersects(query)).collect()
}

#[test]
fn search_matches_brute_force_after_sequential_insertion() {
    let items = random_rectangles(500, SEED_1);
    let mut tree: RTree<Rect, _> = RTree::new(to_bbox);
    for item in items.iter().copied() {
        tree.insert(item);
    }

    let queries = random_rectangles(20, SEED_2);
    for query in &queries {
        let query_bbox = to_bbox(query);
        let mut expected = brute_force_search(&items, &query_bbox);
        let mut actual = tree.search(&query_bbox);
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        actual.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(expected, actual);
    }
}

#[test]
fn search_matches_brute_force_after_bulk_load() {
    let items = random_rectangles(800, SEED_1);
    let mut tree: RTree<Rect, _> = RTree::with_max_entries(6, to_bbox);
    tree.load(items.clone());

    let queries = random_rectangles(20, SEED_2);
    for query in &queries {
        let query_bbox = to_bbox(query);
        let mut expected = brute_force_search(&items, &query_bbox);
        let mut actual = tree.search(&query_bbox);
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        actual.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(expected, actual);
    }
    assert!(tree.height() >= 2);
}

#[test]
fn collides_agrees_with_nonempty_search() {
    let items = random_rectangles(300, SEED_1);
    let mut tree: RTree<Rect, _> = RTree::new(to_bbox);
    for item in items.iter().copied() {
        tree.insert(item);
    }

    let queries = random_rectangles(50, SEED_2);
    for query in &queries {
        let query_bbox = to_bbox(query);
        assert_eq!(tree.collides(&query_bbox), !tree.search(&query_bbox).is_empty());
    }
}

#[test]
fn removing_every_item_leaves_an_empty_tree() {
    let items = random_rectangles(200, SEED_1);
    let mut tree: RTree<Rect, _> = RTree::with_max_entries(5, to_bbox);
    for item in items.iter().copied() {
        tree.insert(item);
    }

    for item in &items {
        let removed = tree.remove(item);
        assert_eq!(removed.as_ref(), Some(item));
    }
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}

#[test]
fn emptying_a_multi_level_tree_leaves_it_insertable_and_bboxless() {
    let mut tree: RTree<Rect, _> = RTree::with_max_entries(4, to_bbox);
    let items: Vec<Rect> = (0..5).map(|i| (i as f64, 0.0, i as f64 + 1.0, 1.0)).collect();
    for item in items.iter().copied() {
        tree.insert(item);
    }
    assert!(tree.height() >= 2);

    for item in &items {
        assert_eq!(tree.remove(item).as_ref(), Some(item));
    }

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.bbox(), BBox::empty());

    // Must not panic: a stray non-leaf root with zero children would make
    // the next insert index into an empty children vector.
    tree.insert((9.0, 9.0, 10.0, 10.0));
    assert_eq!(tree.len(), 1);
}

#[test]
fn all_returns_exactly_the_inserted_items() {
    let items = random_rectangles(150, SEED_2);
    let mut tree: RTree<Rect, _> = RTree::new(to_bbox);
    for item in items.iter().copied() {
        tree.insert(item);
    }

    let mut all: Vec<&Rect> = tree.all();
    let mut expected: Vec<&Rect> = items.iter().collect();
    all.sort_by(|a, b| a.partial_cmp(b).unwrap());
    expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(all, expected);
}

#[test]
fn snapshot_round_trip_matches_brute_force_search() {
    let items = random_rectangles(400, SEED_1);
    let mut tree: RTree<Rect, _> = RTree::with_max_entries(7, to_bbox);
    tree.load(items.clone());

    let snapshot = tree.to_snapshot();
    let restored = RTree::from_snapshot_checked(snapshot, to_bbox).expect("tree's own snapshot must validate");

    let queries = random_rectangles(15, SEED_2);
    for query in &queries {
        let query_bbox = to_bbox(query);
        let mut expected = brute_force_search(&items, &query_bbox);
        let mut actual = restored.search(&query_bbox);
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        actual.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(expected, actual);
    }
}

#[test]
fn insert_and_load_produce_equivalent_trees() {
    let items = random_rectangles(600, SEED_1);

    let mut inserted: RTree<Rect, _> = RTree::with_max_entries(8, to_bbox);
    for item in items.iter().copied() {
        inserted.insert(item);
    }

    let mut loaded: RTree<Rect, _> = RTree::with_max_entries(8, to_bbox);
    loaded.load(items.clone());

    assert_eq!(inserted.len(), loaded.len());

    let queries = random_rectangles(20, SEED_2);
    for query in &queries {
        let query_bbox = to_bbox(query);
        let mut a = inserted.search(&query_bbox);
        let mut b = loaded.search(&query_bbox);
        a.sort_by(|x, y| x.partial_cmp(y).unwrap());
        b.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_eq!(a, b);
    }
}
