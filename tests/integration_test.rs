//! Integration tests for cidr-aggregate
//!
//! These tests drive the public aggregation API and the complete
//! read → aggregate → print workflow.

use cidr_aggregate::config::{Config, OutputFormat};
use cidr_aggregate::input::read_entries;
use cidr_aggregate::labels::MergeRule;
use cidr_aggregate::processing::decompose;
use cidr_aggregate::{aggregate_entries, run, CidrBlock, CidrTree};
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::net::Ipv4Addr;
use test_case::test_case;

fn pick_first(a: &'static str, _b: &'static str) -> &'static str {
    a
}

fn ip(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn cidr(s: &str) -> CidrBlock {
    s.parse().unwrap()
}

fn cidrs<V: Clone>(tree: &CidrTree<V>) -> Vec<String> {
    tree.list_cidr()
        .into_iter()
        .map(|(b, _)| b.to_string())
        .collect()
}

#[test]
fn test_subset_cidr_keeps_wider_block() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_cidr(cidr("192.168.0.0/24"), "x").unwrap();
    tree.add_cidr(cidr("192.168.0.0/25"), "x").unwrap();
    assert_eq!(tree.list_cidr(), vec![(cidr("192.168.0.0/24"), "x")]);
}

#[test]
fn test_adjacent_cidr_collapse() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_cidr(cidr("192.168.0.0/24"), "v").unwrap();
    tree.add_cidr(cidr("192.168.1.0/24"), "v").unwrap();
    assert_eq!(tree.list_cidr(), vec![(cidr("192.168.0.0/23"), "v")]);
}

#[test]
fn test_ranges_collapse_to_slash_30() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_range(ip("0.0.0.0"), ip("0.0.0.0"), "v").unwrap();
    tree.add_range(ip("0.0.0.1"), ip("0.0.0.3"), "v").unwrap();
    assert_eq!(tree.list_cidr(), vec![(cidr("0.0.0.0/30"), "v")]);
}

#[test]
fn test_single_ip() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_ip(ip("135.101.67.33"), "v");
    assert_eq!(tree.list_cidr(), vec![(cidr("135.101.67.33/32"), "v")]);
}

#[test]
fn test_no_insertions() {
    let tree: CidrTree<&str> = CidrTree::new(pick_first);
    assert!(tree.list_cidr().is_empty());
    assert!(tree.is_empty());
}

#[test]
fn test_overlapping_ranges() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_range(ip("192.168.0.0"), ip("192.168.0.100"), "v")
        .unwrap();
    tree.add_range(ip("192.168.0.64"), ip("192.168.1.255"), "v")
        .unwrap();
    assert_eq!(tree.list_cidr(), vec![(cidr("192.168.0.0/23"), "v")]);
}

#[test_case("192.168.0.0/24", "192.168.0.0/25", "192.168.0.0/24"; "subset")]
#[test_case("192.168.0.0/25", "192.168.0.0/24", "192.168.0.0/24"; "superset")]
#[test_case("192.168.0.0/24", "192.168.1.0/24", "192.168.0.0/23"; "sequential")]
#[test_case("127.1.2.0/24", "127.1.3.0/24", "127.1.2.0/23"; "sequential loopback")]
#[test_case("192.168.0.0/25", "192.168.0.128/25", "192.168.0.0/24"; "sequential halves")]
fn test_cidr_merge(a: &str, b: &str, expect: &str) {
    let mut tree = CidrTree::new(pick_first);
    tree.add_cidr(cidr(a), "").unwrap();
    tree.add_cidr(cidr(b), "").unwrap();
    assert_eq!(cidrs(&tree), vec![expect]);
}

#[test_case("192.168.0.0", "192.168.0.255", "192.168.0.10", "192.168.0.25", "192.168.0.0/24"; "subset")]
#[test_case("192.168.0.10", "192.168.0.25", "192.168.0.0", "192.168.0.255", "192.168.0.0/24"; "superset")]
#[test_case("192.168.0.0", "192.168.0.255", "192.168.1.0", "192.168.1.255", "192.168.0.0/23"; "sequential")]
#[test_case("192.168.0.0", "192.168.0.127", "192.168.0.128", "192.168.0.255", "192.168.0.0/24"; "sequential halves")]
#[test_case("192.168.0.0", "192.168.0.0", "192.168.0.1", "192.168.0.1", "192.168.0.0/31"; "two addresses")]
fn test_range_merge(s1: &str, e1: &str, s2: &str, e2: &str, expect: &str) {
    let mut tree = CidrTree::new(pick_first);
    tree.add_range(ip(s1), ip(e1), "").unwrap();
    tree.add_range(ip(s2), ip(e2), "").unwrap();
    assert_eq!(cidrs(&tree), vec![expect]);
}

#[test]
fn test_one_cidr_with_host_bits_normalised() {
    let mut tree = CidrTree::new(pick_first);
    let block = CidrBlock::containing(u32::from(ip("1.2.3.4")), 16).unwrap();
    tree.add_cidr(block, "").unwrap();
    assert_eq!(cidrs(&tree), vec!["1.2.0.0/16"]);
}

#[test]
fn test_one_range() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_range(ip("192.168.1.0"), ip("192.168.1.63"), "")
        .unwrap();
    assert_eq!(cidrs(&tree), vec!["192.168.1.0/26"]);
}

#[test]
fn test_ip_range_cidr() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_ip(ip("192.168.1.0"), "");
    // slight overlap with the cidr below
    tree.add_range(ip("192.168.1.1"), ip("192.168.1.129"), "")
        .unwrap();
    tree.add_cidr(cidr("192.168.1.128/25"), "").unwrap();
    assert_eq!(cidrs(&tree), vec!["192.168.1.0/24"]);
}

#[test]
fn test_whole_address_space() {
    let mut tree = CidrTree::new(pick_first);
    tree.add_range(ip("0.0.0.0"), ip("255.255.255.255"), "all")
        .unwrap();
    assert_eq!(tree.list_cidr(), vec![(cidr("0.0.0.0/0"), "all")]);
    assert!(tree.contains(ip("255.255.255.255")));
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_merge_receives_lower_block_first() {
    let mut tree = CidrTree::new(|a: String, b: String| format!("({a} {b})"));
    tree.add_cidr(cidr("10.0.0.192/26"), "d".to_string()).unwrap();
    tree.add_cidr(cidr("10.0.0.128/26"), "c".to_string()).unwrap();
    tree.add_cidr(cidr("10.0.0.0/25"), "ab".to_string()).unwrap();
    assert_eq!(
        tree.list_cidr(),
        vec![(cidr("10.0.0.0/24"), "(ab (c d))".to_string())]
    );
}

#[test]
fn test_insert_into_covered_region_keeps_value() {
    let mut tree = CidrTree::new(|a: String, b: String| format!("{a}{b}"));
    tree.add_cidr(cidr("10.0.0.0/8"), "old".to_string()).unwrap();
    tree.add_ip(ip("10.1.2.3"), "new".to_string());
    tree.add_range(ip("10.0.0.0"), ip("10.0.0.9"), "new".to_string())
        .unwrap();
    assert_eq!(
        tree.list_cidr(),
        vec![(cidr("10.0.0.0/8"), "old".to_string())]
    );
}

#[test]
fn test_idempotence() {
    let mut once = CidrTree::new(pick_first);
    let mut twice = CidrTree::new(pick_first);
    for block in ["10.0.0.0/9", "10.200.0.0/16", "172.16.5.4/32"] {
        once.add_cidr(cidr(block), "v").unwrap();
        twice.add_cidr(cidr(block), "v").unwrap();
        twice.add_cidr(cidr(block), "v").unwrap();
    }
    assert_eq!(once.list_cidr(), twice.list_cidr());
}

#[test]
fn test_random_insertions_cover_exactly() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let mut tree = CidrTree::new(pick_first);
        let mut inserted: Vec<(u32, u32)> = Vec::new();
        // keep everything inside 10.0.0.0/20 so ranges meet and collapse
        for _ in 0..20 {
            let start: u32 = 0x0A000000 + rng.gen_range(0..4096);
            let end = (start + rng.gen_range(0..300)).min(0x0A000FFF);
            match rng.gen_range(0..3) {
                0 => {
                    tree.add_ip(Ipv4Addr::from(start), "v");
                    inserted.push((start, start));
                }
                1 => {
                    tree.add_range(Ipv4Addr::from(start), Ipv4Addr::from(end), "v")
                        .unwrap();
                    inserted.push((start, end));
                }
                _ => {
                    let len = rng.gen_range(22..=32);
                    let block = CidrBlock::containing(start, len).unwrap();
                    tree.add_cidr(block, "v").unwrap();
                    inserted.push((block.base(), block.last()));
                }
            }
        }

        let list = tree.list_cidr();
        // sorted, disjoint, and no two siblings left unmerged
        for ((a, _), (b, _)) in list.iter().tuple_windows() {
            assert!(a.last() < b.base(), "{a} overlaps {b}");
            if a.prefix_len() == b.prefix_len() && a.prefix_len() > 0 {
                let parent = CidrBlock::containing(a.base(), a.prefix_len() - 1).unwrap();
                assert!(!parent.covers(b), "{a} and {b} were not collapsed");
            }
        }
        // every address is covered by exactly one block, and only inserted ones are
        for addr in 0x0A000000u32..=0x0A000FFF {
            let expected = inserted.iter().any(|&(s, e)| s <= addr && addr <= e);
            let hits = list.iter().filter(|(b, _)| b.contains(addr)).count();
            assert_eq!(hits, usize::from(expected), "address {}", Ipv4Addr::from(addr));
        }
    }
}

#[test]
fn test_decompose_feeds_tree_back_to_range() {
    let (start, end) = (ip("10.0.0.5"), ip("10.0.3.250"));
    let mut tree = CidrTree::new(pick_first);
    tree.add_range(start, end, "v").unwrap();
    let blocks = decompose(u32::from(start), u32::from(end)).unwrap();
    let listed: Vec<CidrBlock> = tree.list_cidr().into_iter().map(|(b, _)| b).collect();
    assert_eq!(listed, blocks);
}

#[test]
fn test_full_workflow_with_sample_file() {
    let entries = read_entries(Some("tests/test_data/blocklist_01.txt"), false)
        .expect("Failed to read sample entries");
    assert_eq!(entries.len(), 6, "Expected 6 entries in sample data");

    let tree = aggregate_entries(entries, MergeRule::Join, "").expect("Failed to aggregate");
    let list: Vec<(String, String)> = tree
        .list_cidr()
        .into_iter()
        .map(|(b, v)| (b.to_string(), v))
        .collect();
    assert_eq!(
        list,
        vec![
            ("1.2.0.0/16".to_string(), "legacy".to_string()),
            ("10.0.0.0/24".to_string(), "office,vpn".to_string()),
            ("135.101.67.33/32".to_string(), "scanner".to_string()),
            ("192.168.0.0/23".to_string(), "lan".to_string()),
        ]
    );
}

#[test]
fn test_run_writes_json() {
    let config = Config {
        input: Some("tests/test_data/blocklist_01.txt".to_string()),
        format: OutputFormat::Json,
        merge: MergeRule::First,
        label: "blocked".to_string(),
        strict: false,
        no_color: true,
        log_config: "log4rs.yml".to_string(),
    };
    let mut out = Vec::new();
    run(&config, &mut out).expect("run failed");

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1]["cidr"], "10.0.0.0/24");
    assert_eq!(rows[1]["value"], "vpn");
    assert_eq!(rows[3]["size"], 512);
}

#[test]
fn test_run_strict_rejects_host_bits() {
    let config = Config {
        input: Some("tests/test_data/blocklist_01.txt".to_string()),
        format: OutputFormat::Text,
        merge: MergeRule::First,
        label: String::new(),
        strict: true,
        no_color: true,
        log_config: "log4rs.yml".to_string(),
    };
    let mut out = Vec::new();
    let err = run(&config, &mut out).unwrap_err();
    assert!(err.to_string().contains("line 8"), "{err}");
    assert!(out.is_empty());
}
