use crate::integration::support::memory_fs;
use pkgfs::store::{NodeRecord, NodeType};
use pkgfs::tree::{build_tree, count_nodes, TreeNode};
use proptest::prelude::*;

fn shape(forest: &[TreeNode]) -> Vec<(String, Vec<String>)> {
    let mut out = Vec::new();
    for node in forest {
        out.push((
            node.path.clone(),
            node.children().iter().map(|c| c.path.clone()).collect(),
        ));
        out.extend(shape(node.children()));
    }
    out
}

#[tokio::test]
async fn tree_is_stable_across_rebuilds() {
    let fs = memory_fs().await;
    for path in ["/Package/R", "/Package/tests", "/Package/man"] {
        fs.create_node(path, NodeType::Folder, None).await.unwrap();
    }
    for path in ["/Package/DESCRIPTION", "/Package/R/zeta.R", "/Package/R/Alpha.R"] {
        fs.create_node(path, NodeType::File, Some("x")).await.unwrap();
    }

    let first = fs.tree().await.unwrap();
    let second = fs.tree().await.unwrap();
    assert_eq!(first, second);

    let package = first.iter().find(|n| n.path == "/Package").unwrap();
    let names: Vec<&str> = package.children().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["R", "man", "tests", "DESCRIPTION"]);

    let r = package.find("/Package/R").unwrap();
    let names: Vec<&str> = r.children().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha.R", "zeta.R"]);
}

#[tokio::test]
async fn orphans_surface_as_roots() {
    let fs = memory_fs().await;
    fs.create_node("/Lost/found.R", NodeType::File, Some(""))
        .await
        .unwrap();

    let forest = fs.tree().await.unwrap();
    assert!(forest.iter().any(|n| n.path == "/Lost/found.R"));
    assert_eq!(count_nodes(&forest), 4);
}

fn arb_records() -> impl Strategy<Value = Vec<NodeRecord>> {
    let name = prop::sample::select(vec!["a", "B", "c.R", "D.md", "e"]);
    prop::collection::vec((prop::collection::vec(name, 1..4), any::<bool>()), 0..24).prop_map(
        |entries| {
            let mut seen = std::collections::HashSet::new();
            entries
                .into_iter()
                .filter_map(|(segments, folder)| {
                    let path = format!("/{}", segments.join("/"));
                    if !seen.insert(path.clone()) {
                        return None;
                    }
                    Some(if folder {
                        NodeRecord::folder(path, 0)
                    } else {
                        NodeRecord::file(path, "", 0)
                    })
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn build_is_order_independent(records in arb_records()) {
        let forward = build_tree(&records);
        let mut reversed = records.clone();
        reversed.reverse();
        let backward = build_tree(&reversed);

        prop_assert_eq!(shape(&forward), shape(&backward));
        prop_assert_eq!(count_nodes(&forward), records.len());
    }
}
