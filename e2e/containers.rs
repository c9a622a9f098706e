//! E2E suite: containers and bit streams under randomized workloads,
//! checked against straightforward model implementations.

use std::collections::VecDeque;

use primkit::bits::{BitReader, BitWriter};
use primkit::ds::{Bucket, ListArena, MinHeap, RingBuf, SwissTable, TableError};
use rand::{rngs::StdRng, Rng, SeedableRng};

// ─────────────────────────────────────────────────────────────────────────────
// Ring buffer vs. VecDeque model
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn ringbuf_random_ops_match_model() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut storage = [0u8; 61]; // odd capacity exercises the modulo path
    let mut rb = RingBuf::new(&mut storage);
    let mut model: VecDeque<u8> = VecDeque::new();

    for _ in 0..10_000 {
        match rng.gen_range(0..3) {
            0 => {
                let n = rng.gen_range(0..40);
                let data: Vec<u8> = (0..n).map(|_| rng.gen()).collect();
                let written = rb.write(&data) as usize;
                let expect = (61 - model.len()).min(n);
                assert_eq!(written, expect);
                model.extend(&data[..written]);
            }
            1 => {
                let n = rng.gen_range(0..40);
                let mut out = vec![0u8; n];
                let read = rb.read(&mut out) as usize;
                assert_eq!(read, model.len().min(n));
                for b in out.iter().take(read) {
                    assert_eq!(*b, model.pop_front().unwrap());
                }
            }
            _ => {
                let off = rng.gen_range(0..70u32);
                let mut out = [0u8; 16];
                let n = rb.peek(&mut out, off) as usize;
                if off as usize > model.len() {
                    assert_eq!(n, 0);
                } else {
                    assert_eq!(n, (model.len() - off as usize).min(16));
                    for (i, b) in out.iter().take(n).enumerate() {
                        assert_eq!(*b, model[off as usize + i]);
                    }
                }
            }
        }
        assert_eq!(rb.used() as usize, model.len());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Min-heap: heapsort against the standard sort
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn minheap_sorts_random_input() {
    let cmp = |a: &u64, b: &u64| a.cmp(b);
    let mut rng = StdRng::seed_from_u64(12);

    for n in [0usize, 1, 2, 7, 64, 500] {
        let values: Vec<u64> = (0..n).map(|_| rng.gen_range(0..1000)).collect();

        let mut slots = vec![0u64; n.max(1)];
        let mut heap = MinHeap::new(&mut slots);
        for &v in &values {
            heap.insert(v, cmp).unwrap();
        }
        let mut drained = Vec::new();
        while let Some(v) = heap.extract(cmp) {
            drained.push(v);
        }

        let mut sorted = values.clone();
        sorted.sort();
        assert_eq!(drained, sorted, "n = {n}");
    }
}

#[test]
fn minheap_equal_keys_never_displace_the_root() {
    // payload in the low bits, key in the high bits; comparator sees only
    // the key, so sift movement is observable through the payload
    let cmp = |a: &u64, b: &u64| (a >> 32).cmp(&(b >> 32));
    let mut slots = [0u64; 8];
    let mut heap = MinHeap::new(&mut slots);
    heap.insert(1 << 32, cmp).unwrap();
    for i in 1..6u64 {
        // equal keys sift past nothing: the first element stays the root
        heap.insert((1 << 32) | i, cmp).unwrap();
        assert_eq!(heap.peek(), Some(&(1 << 32)));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Swiss table vs. HashMap model
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Default)]
struct Entry {
    key: u32,
    val: u32,
}

impl Bucket for Entry {
    type Key = u32;

    fn hash(key: &u32) -> u64 {
        // weak two-round mix; collisions and long probes are the point
        let mut h = u64::from(*key).wrapping_mul(0x9e37_79b9);
        h ^= h >> 13;
        h
    }

    fn matches(&self, key: &u32) -> bool {
        self.key == *key
    }
}

#[test]
fn swiss_table_random_churn_matches_model() {
    let mut rng = StdRng::seed_from_u64(13);
    let mut ctrl = [0u8; 256];
    let mut buckets = [Entry::default(); 256];
    let mut table = SwissTable::new(&mut ctrl, &mut buckets);
    let mut model = std::collections::HashMap::<u32, u32>::new();

    for step in 0..50_000u32 {
        let key = rng.gen_range(0..400); // > capacity → frequent collisions
        match rng.gen_range(0..3) {
            0 => {
                match table.insert(&key) {
                    Ok((slot, fresh)) => {
                        if fresh {
                            *table.bucket_mut(slot) = Entry { key, val: step };
                        } else {
                            table.bucket_mut(slot).val = step;
                        }
                        model.insert(key, step);
                    }
                    Err(TableError::Full) => {
                        assert_eq!(model.len(), 256, "premature full at step {step}");
                    }
                }
            }
            1 => {
                let got = table.find(&key).map(|s| table.bucket(s).val);
                assert_eq!(got, model.get(&key).copied(), "find({key}) at step {step}");
            }
            _ => {
                let ours = table.remove(&key).is_some();
                let models = model.remove(&key).is_some();
                assert_eq!(ours, models, "remove({key}) at step {step}");
            }
        }
        assert_eq!(table.len(), model.len());
    }

    assert_eq!(table.load_factor_permille(), model.len() * 1000 / 256);

    let mut live: Vec<(u32, u32)> = table.iter().map(|(_, e)| (e.key, e.val)).collect();
    live.sort_unstable();
    let mut expect: Vec<(u32, u32)> = model.iter().map(|(&k, &v)| (k, v)).collect();
    expect.sort_unstable();
    assert_eq!(live, expect);
}

// ─────────────────────────────────────────────────────────────────────────────
// Arena list as a deque model
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn list_arena_matches_deque() {
    let mut rng = StdRng::seed_from_u64(14);
    let mut links = [(0u32, 0u32); 64];
    let mut vals = [0u32; 64];
    let mut list = ListArena::new(&mut links);
    let mut model: VecDeque<u32> = VecDeque::new();

    for step in 0..20_000u32 {
        match rng.gen_range(0..4) {
            0 => {
                if let Some(slot) = list.push_front() {
                    vals[slot as usize] = step;
                    model.push_front(step);
                } else {
                    assert_eq!(model.len(), 64);
                }
            }
            1 => {
                if let Some(slot) = list.push_back() {
                    vals[slot as usize] = step;
                    model.push_back(step);
                } else {
                    assert_eq!(model.len(), 64);
                }
            }
            2 => {
                if let Some(head) = list.head() {
                    list.remove(head);
                    model.pop_front();
                }
            }
            _ => {
                if let Some(tail) = list.tail() {
                    list.remove(tail);
                    model.pop_back();
                }
            }
        }
        assert_eq!(list.len(), model.len());
    }

    let order: Vec<u32> = list.iter().map(|i| vals[i as usize]).collect();
    let expect: Vec<u32> = model.iter().copied().collect();
    assert_eq!(order, expect);
}

// ─────────────────────────────────────────────────────────────────────────────
// Bit writer → bit reader round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bit_stream_round_trip() {
    let mut rng = StdRng::seed_from_u64(15);

    for _ in 0..200 {
        let fields: Vec<(u32, u32)> = (0..rng.gen_range(1..40))
            .map(|_| {
                let bits = rng.gen_range(1..=24u32);
                (rng.gen::<u32>() & ((1 << bits) - 1), bits)
            })
            .collect();

        // writer side: drain into a byte vector whenever the staging fills
        let mut w = BitWriter::new();
        let mut encoded = Vec::new();
        for &(v, bits) in &fields {
            while w.put(v, bits) {
                encoded.extend_from_slice(&w.bytes()[..w.whole_bytes()]);
                let partial = w.byte_len() - w.whole_bytes();
                assert_eq!(partial, 0, "flush only happens on whole-byte boundaries here");
                w.flush();
                if w.pending_bits() == 0 {
                    break;
                }
            }
        }
        w.skip_to_byte();
        encoded.extend_from_slice(w.bytes());

        // reader side
        let mut r = BitReader::new();
        let mut src: &[u8] = &encoded;
        for &(v, bits) in &fields {
            loop {
                let n = r.fill(src);
                src = &src[n..];
                if let Some(got) = r.take(bits) {
                    assert_eq!(got, v, "{bits}-bit field");
                    break;
                }
            }
        }
    }
}
