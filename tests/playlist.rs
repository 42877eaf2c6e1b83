//! Playlist Integration Tests
//!
//! Tests for ordering, duplicate rejection, removal and reordering.

use mfun::{Catalog, Playlist, Playlists, SharedCatalog, SharedPlaylist, Song, SongId};

fn song(title: &str) -> Song {
    Song::new(title, "Artist", "Album", "Genre", 3.0)
}

fn order(playlist: &Playlist) -> Vec<(usize, String)> {
    playlist
        .display()
        .into_iter()
        .map(|(position, id)| (position, id.title.clone()))
        .collect()
}

fn entry(position: usize, title: &str) -> (usize, String) {
    (position, title.to_string())
}

#[test]
fn test_display_follows_add_order() {
    let mut playlist = Playlist::new("Ordered");
    for title in ["A", "B", "C"] {
        assert!(playlist.add(&song(title)));
    }

    assert_eq!(
        order(&playlist),
        vec![entry(1, "A"), entry(2, "B"), entry(3, "C")]
    );
}

#[test]
fn test_add_same_song_twice() {
    let mut playlist = Playlist::new("Dupes");
    let a = song("A");

    assert!(playlist.add(&a));
    assert!(!playlist.add(&a));
    assert_eq!(playlist.display().len(), 1);
}

#[test]
fn test_same_title_different_artists_both_fit() {
    let mut playlist = Playlist::new("Covers");
    let original = Song::new("Hallelujah", "Leonard Cohen", "Various Positions", "Folk", "4:39");
    let cover = Song::new("Hallelujah", "Jeff Buckley", "Grace", "Rock", "6:53");

    assert!(playlist.add(&original));
    assert!(playlist.add(&cover));
    assert_eq!(playlist.len(), 2);
}

#[test]
fn test_add_missing_catalog_song() {
    let catalog = Catalog::new();
    let mut playlist = Playlist::new("Empty");

    assert!(!playlist.add(catalog.get(&SongId::new("Nobody", "Nothing"))));
    assert!(playlist.is_empty());
}

#[test]
fn test_remove_member_and_non_member() {
    let mut playlist = Playlist::new("Removal");
    let (a, b) = (song("A"), song("B"));
    playlist.add(&a);
    playlist.add(&b);

    assert!(!playlist.remove(&song("Z").id()));
    assert_eq!(order(&playlist), vec![entry(1, "A"), entry(2, "B")]);

    assert!(playlist.remove(&a.id()));
    assert_eq!(playlist.len(), 1);
    assert!(!playlist.contains(&a.id()));
    assert_eq!(order(&playlist), vec![entry(1, "B")]);

    assert!(!playlist.remove(&a.id()));
}

#[test]
fn test_reorder_subset_drops_the_rest() {
    let mut playlist = Playlist::new("Reorder");
    let (a, b, c) = (song("A"), song("B"), song("C"));
    playlist.add(&a);
    playlist.add(&b);
    playlist.add(&c);

    playlist.reorder(vec![b.id(), a.id()]);

    assert_eq!(order(&playlist), vec![entry(1, "B"), entry(2, "A")]);
    assert!(!playlist.contains(&c.id()));
}

#[test]
fn test_reorder_full_permutation() {
    let mut playlist = Playlist::new("Reorder");
    let songs: Vec<Song> = ["A", "B", "C", "D"].into_iter().map(song).collect();
    for s in &songs {
        playlist.add(s);
    }

    playlist.reorder(songs.iter().rev().map(Song::id));

    assert_eq!(
        order(&playlist),
        vec![entry(1, "D"), entry(2, "C"), entry(3, "B"), entry(4, "A")]
    );
}

#[test]
fn test_reorder_never_adds_members() {
    let mut playlist = Playlist::new("Reorder");
    playlist.add(&song("A"));

    playlist.reorder(vec![song("X").id(), song("A").id(), song("Y").id()]);

    assert_eq!(order(&playlist), vec![entry(1, "A")]);
}

#[test]
fn test_catalog_changes_do_not_touch_playlists() {
    let mut catalog = Catalog::new();
    let a = song("A");
    catalog.insert(a.clone());

    let mut playlist = Playlist::new("Independent");
    playlist.add(catalog.get(&a.id()));

    catalog.insert(song("B"));
    catalog.remove(&a.id());

    assert_eq!(order(&playlist), vec![entry(1, "A")]);
    assert_eq!(playlist.resolve(&catalog), vec![(1, None)]);
}

#[test]
fn test_many_playlists() {
    let mut playlists = Playlists::new();
    let ids: Vec<_> = (0..50).map(|i| playlists.create(format!("List {i}"))).collect();

    assert_eq!(playlists.len(), 50);
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(playlists.get(*id).unwrap().name(), format!("List {i}"));
    }

    let names: Vec<&str> = playlists.iter().take(2).map(|p| p.name()).collect();
    assert_eq!(names, vec!["List 0", "List 1"]);
}

#[test]
fn test_shared_handles() {
    let catalog = SharedCatalog::default();
    let playlist = SharedPlaylist::new(Playlist::new("Shared"));
    let a = song("A");

    assert!(catalog.insert(a.clone()));
    assert!(!catalog.insert(a.clone()));

    let stored = catalog.get(&a.id());
    assert!(playlist.add(stored.as_ref()));
    assert!(!playlist.add(stored.as_ref()));

    playlist.reorder(vec![a.id()]);
    assert_eq!(playlist.display(), vec![(1, a.id())]);

    assert!(playlist.remove(&a.id()));
    assert!(playlist.is_empty());
}
