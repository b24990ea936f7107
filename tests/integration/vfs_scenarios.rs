use crate::integration::support::{paths, snapshot, with_backends, with_ticking_backends, NOW};
use pkgfs::error::FsError;
use pkgfs::store::{NodeRecord, NodeType};
use pkgfs::vfs::{FileSystem, PACKAGE_DIR, README_PATH, RESOURCES_DIR};

#[tokio::test]
async fn seeded_store_holds_exactly_the_initial_layout() {
    with_backends(|fs| async move {
        assert_eq!(
            paths(&fs).await,
            vec![PACKAGE_DIR, README_PATH, RESOURCES_DIR]
        );
        let readme = fs.get_node(README_PATH).await.unwrap().unwrap();
        assert!(readme.size > 0);
        assert_eq!(readme.last_modified, NOW);

        assert!(!fs.initialize().await.unwrap());
        assert_eq!(paths(&fs).await.len(), 3);
    })
    .await;
}

#[tokio::test]
async fn create_then_get_returns_exact_path_and_type() {
    with_backends(|fs| async move {
        fs.create_node("/Package/R", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/R/hello.R", NodeType::File, Some("hello <- 1"))
            .await
            .unwrap();

        let folder = fs.get_node("/Package/R").await.unwrap().unwrap();
        assert_eq!(folder.path, "/Package/R");
        assert_eq!(folder.node_type, NodeType::Folder);

        let file = fs.get_node("/Package/R/hello.R").await.unwrap().unwrap();
        assert_eq!(file.node_type, NodeType::File);
        assert_eq!(file.content.as_deref(), Some("hello <- 1"));
        assert_eq!(file.size, 10);
    })
    .await;
}

#[tokio::test]
async fn rename_folder_carries_descendants() {
    with_backends(|fs| async move {
        fs.create_node("/Package/demo", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node(
            "/Package/demo/DESCRIPTION",
            NodeType::File,
            Some("Package: demo"),
        )
        .await
        .unwrap();

        let new_path = fs.rename_node("/Package/demo", "demo2").await.unwrap();
        assert_eq!(new_path, "/Package/demo2");

        let moved = fs
            .get_node("/Package/demo2/DESCRIPTION")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.content.as_deref(), Some("Package: demo"));
        assert_eq!(moved.node_type, NodeType::File);
        assert_eq!(moved.size, 13);
        assert!(fs
            .get_node("/Package/demo/DESCRIPTION")
            .await
            .unwrap()
            .is_none());
        assert!(paths(&fs)
            .await
            .iter()
            .all(|p| p != "/Package/demo" && !p.starts_with("/Package/demo/")));
    })
    .await;
}

#[tokio::test]
async fn rename_onto_existing_sibling_is_rejected() {
    with_backends(|fs| async move {
        fs.create_node("/Package/a.R", NodeType::File, Some("a"))
            .await
            .unwrap();
        fs.create_node("/Package/b.R", NodeType::File, Some("b"))
            .await
            .unwrap();
        let before = paths(&fs).await;

        let err = fs.rename_node("/Package/a.R", "b.R").await.unwrap_err();
        assert!(matches!(err, FsError::DuplicatePath(p) if p == "/Package/b.R"));
        assert_eq!(paths(&fs).await, before);

        let err = fs.rename_node("/Package/missing.R", "c.R").await.unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    })
    .await;
}

#[tokio::test]
async fn duplicate_create_keeps_first_node() {
    with_backends(|fs| async move {
        fs.create_node("/Package/x", NodeType::File, Some(""))
            .await
            .unwrap();
        let err = fs
            .create_node("/Package/x", NodeType::File, Some("y"))
            .await
            .unwrap_err();
        assert!(matches!(err, FsError::DuplicatePath(_)));

        let kept = fs.get_node("/Package/x").await.unwrap().unwrap();
        assert_eq!(kept.content.as_deref(), Some(""));
        assert_eq!(kept.size, 0);
    })
    .await;
}

#[tokio::test]
async fn delete_removes_closure_and_nothing_else() {
    with_backends(|fs| async move {
        fs.create_node("/Package/R", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/R/a.R", NodeType::File, Some("a"))
            .await
            .unwrap();
        fs.create_node("/Package/R/sub", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/R/sub/b.R", NodeType::File, Some("b"))
            .await
            .unwrap();
        fs.create_node("/Package/Rfile.R", NodeType::File, Some("sibling"))
            .await
            .unwrap();

        let removed = fs.delete_node("/Package/R").await.unwrap();
        assert_eq!(removed, 4);
        assert_eq!(
            paths(&fs).await,
            vec![
                PACKAGE_DIR,
                "/Package/Rfile.R",
                README_PATH,
                RESOURCES_DIR
            ]
        );

        assert_eq!(fs.delete_node("/Package/R").await.unwrap(), 0);
    })
    .await;
}

#[tokio::test]
async fn duplicate_folder_produces_disjoint_copy() {
    with_backends(|fs| async move {
        fs.create_node("/Package/R", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/R/a.R", NodeType::File, Some("alpha"))
            .await
            .unwrap();

        let first = fs.duplicate_node("/Package/R").await.unwrap();
        assert_eq!(first, "/Package/R (copy)");
        let second = fs.duplicate_node("/Package/R").await.unwrap();
        assert_eq!(second, "/Package/R (copy 2)");

        let copy = fs
            .get_node("/Package/R (copy)/a.R")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(copy.content.as_deref(), Some("alpha"));
        assert_eq!(copy.size, 5);

        fs.save_file_content("/Package/R (copy)/a.R", "changed")
            .await
            .unwrap();
        assert_eq!(fs.read_file("/Package/R/a.R").await.unwrap(), "alpha");
    })
    .await;
}

#[tokio::test]
async fn duplicate_file_inserts_copy_before_extension() {
    with_backends(|fs| async move {
        fs.create_node("/Package/report.R", NodeType::File, Some("r"))
            .await
            .unwrap();
        assert_eq!(
            fs.duplicate_node("/Package/report.R").await.unwrap(),
            "/Package/report (copy).R"
        );
        assert_eq!(
            fs.duplicate_node("/Package/report.R").await.unwrap(),
            "/Package/report (copy 2).R"
        );

        let err = fs.duplicate_node("/Package/none.R").await.unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
    })
    .await;
}

#[tokio::test]
async fn save_content_type_checks() {
    with_backends(|fs| async move {
        let err = fs
            .save_file_content("/Package/nope.R", "x")
            .await
            .unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));

        let err = fs.save_file_content(PACKAGE_DIR, "x").await.unwrap_err();
        assert!(matches!(err, FsError::NotAFile(_)));

        let saved = fs.save_file_content(README_PATH, "short").await.unwrap();
        assert_eq!(saved.size, 5);
        assert_eq!(fs.read_file(README_PATH).await.unwrap(), "short");
    })
    .await;
}

#[tokio::test]
async fn untitled_nodes_pick_next_free_name() {
    with_backends(|fs| async move {
        assert_eq!(
            fs.create_untitled_file(PACKAGE_DIR).await.unwrap(),
            "/Package/Untitled.R"
        );
        assert_eq!(
            fs.create_untitled_file(PACKAGE_DIR).await.unwrap(),
            "/Package/Untitled-1.R"
        );
        assert_eq!(
            fs.create_untitled_folder("/").await.unwrap(),
            "/NewFolder"
        );

        let err = fs.create_untitled_file(README_PATH).await.unwrap_err();
        assert!(matches!(err, FsError::NotAFolder(_)));
    })
    .await;
}

#[tokio::test]
async fn reset_restores_seed() {
    with_backends(|fs| async move {
        fs.create_node("/Package/R", NodeType::Folder, None)
            .await
            .unwrap();
        fs.delete_node(README_PATH).await.unwrap();

        fs.reset().await.unwrap();
        assert_eq!(
            paths(&fs).await,
            vec![PACKAGE_DIR, README_PATH, RESOURCES_DIR]
        );
    })
    .await;
}

#[tokio::test]
async fn upload_lands_under_resources_and_exports() {
    with_backends(|fs| async move {
        let record = fs
            .upload_resource("notes.md", "# Notes")
            .await
            .unwrap();
        assert_eq!(record.path, "/Resources/notes.md");

        let entries = fs.export_entries().await.unwrap();
        let exported: Vec<&str> = entries.iter().map(|e| e.path()).collect();
        assert!(exported.contains(&"Resources/notes.md"));
        assert!(exported.iter().all(|p| !p.starts_with('/')));
    })
    .await;
}

async fn record(fs: &FileSystem, path: &str) -> NodeRecord {
    fs.get_node(path).await.unwrap().unwrap()
}

fn assert_same_payload(copy: &NodeRecord, original: &NodeRecord) {
    assert_eq!(copy.node_type, original.node_type, "{}", copy.path);
    assert_eq!(copy.content, original.content, "{}", copy.path);
    assert_eq!(copy.size, original.size, "{}", copy.path);
}

#[tokio::test]
async fn rename_and_duplicate_refresh_stamps_and_keep_payload() {
    with_ticking_backends(|fs| async move {
        fs.create_node("/Package/d", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/d/f.R", NodeType::File, Some("f <- 1"))
            .await
            .unwrap();
        fs.create_node("/Package/d/sub", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/d/sub/g.R", NodeType::File, Some("g <- 2"))
            .await
            .unwrap();

        let members = ["", "/f.R", "/sub", "/sub/g.R"];
        let mut originals = Vec::new();
        for suffix in members {
            originals.push(record(&fs, &format!("/Package/d{}", suffix)).await);
        }

        fs.rename_node("/Package/d", "e").await.unwrap();
        let mut renamed = Vec::new();
        for (suffix, original) in members.iter().zip(&originals) {
            let moved = record(&fs, &format!("/Package/e{}", suffix)).await;
            assert_same_payload(&moved, original);
            assert!(moved.last_modified > original.last_modified, "{}", moved.path);
            renamed.push(moved);
        }

        let copy_root = fs.duplicate_node("/Package/e").await.unwrap();
        assert_eq!(copy_root, "/Package/e (copy)");
        for (suffix, source) in members.iter().zip(&renamed) {
            let copy = record(&fs, &format!("{}{}", copy_root, suffix)).await;
            assert_same_payload(&copy, source);
            assert!(copy.last_modified > source.last_modified, "{}", copy.path);

            let untouched = record(&fs, &source.path).await;
            assert_eq!(&untouched, source);
        }

        let before = record(&fs, "/Package/e/f.R").await;
        let saved = fs.save_file_content("/Package/e/f.R", "f <- 10").await.unwrap();
        assert!(saved.last_modified > before.last_modified);
        assert_eq!(saved.size, 7);
    })
    .await;
}

#[tokio::test]
async fn failed_rename_cascade_leaves_store_unchanged() {
    with_backends(|fs| async move {
        fs.create_node("/Package/e/f.R", NodeType::File, Some("orphan"))
            .await
            .unwrap();
        fs.create_node("/Package/d", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/d/f.R", NodeType::File, Some("child"))
            .await
            .unwrap();
        let before = snapshot(&fs).await;

        let err = fs.rename_node("/Package/d", "e").await.unwrap_err();
        assert!(matches!(err, FsError::DuplicatePath(p) if p == "/Package/e/f.R"));
        assert_eq!(snapshot(&fs).await, before);
    })
    .await;
}

#[tokio::test]
async fn failed_duplicate_cascade_leaves_store_unchanged() {
    with_backends(|fs| async move {
        fs.create_node("/Package/d (copy)/f.R", NodeType::File, Some("orphan"))
            .await
            .unwrap();
        fs.create_node("/Package/d", NodeType::Folder, None)
            .await
            .unwrap();
        fs.create_node("/Package/d/f.R", NodeType::File, Some("child"))
            .await
            .unwrap();
        let before = snapshot(&fs).await;

        let err = fs.duplicate_node("/Package/d").await.unwrap_err();
        assert!(matches!(err, FsError::DuplicatePath(p) if p == "/Package/d (copy)/f.R"));
        assert_eq!(snapshot(&fs).await, before);
    })
    .await;
}
