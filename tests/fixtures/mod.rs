#![allow(dead_code)]

use promograph::model::{Node, NodeKind, RelationType};
use promograph::store::MemoryGraphStore;
use uuid::Uuid;

/// Promo graph shared by the pathfinding and recommendation tests.
///
/// Cluster layout:
/// - Velvet Static (UK) sits at the center with four pitch contacts and two
///   direct artist neighbors; Mirror Motel is only reachable through
///   Glass Arcade.
/// - An isolated four-artist chain for hop-count and budget tests.
/// - An eight-artist relay for the depth-ceiling tests.
/// - A diamond with a supports branch and a similar-to branch for the
///   influence-path tests.
pub struct PromoGraph {
    pub store: MemoryGraphStore,
    pub velvet_static: Uuid,
    pub neon_harbor: Uuid,
    pub glass_arcade: Uuid,
    pub mirror_motel: Uuid,
    pub amazing_radio: Uuid,
    pub bbc_radio_6: Uuid,
    pub nme_writer: Uuid,
    pub the_quietus: Uuid,
    pub chain: [Uuid; 4],
    pub relay: [Uuid; 8],
    pub diamond_src: Uuid,
    pub diamond_supports: Uuid,
    pub diamond_similar: Uuid,
    pub diamond_dst: Uuid,
}

impl PromoGraph {
    pub fn create() -> Self {
        let mut store = MemoryGraphStore::new();

        let velvet_static = store.add_node(Node::artist(
            "Velvet Static",
            Some("UK"),
            &["indie rock"],
        ));
        let neon_harbor = store.add_node(Node::artist(
            "Neon Harbor",
            Some("UK"),
            &["indie rock", "shoegaze"],
        ));
        let glass_arcade = store.add_node(Node::artist("Glass Arcade", Some("SE"), &["synthpop"]));
        let mirror_motel = store.add_node(Node::artist("Mirror Motel", Some("SE"), &["synthpop"]));

        let amazing_radio =
            store.add_node(Node::contact(NodeKind::RadioHost, "Amazing Radio", Some("UK")));
        let bbc_radio_6 =
            store.add_node(Node::contact(NodeKind::RadioHost, "BBC Radio 6", Some("UK")));
        let nme_writer =
            store.add_node(Node::contact(NodeKind::Journalist, "NME Writer", Some("UK")));
        let the_quietus = store.add_node(Node::contact(NodeKind::Blog, "The Quietus", Some("UK")));

        // Velvet Static's direct circle. The three same_scene contacts score
        // identically and exercise the name tie-break.
        store.add_edge(velvet_static, amazing_radio, RelationType::SameScene, 0.25);
        store.add_edge(velvet_static, bbc_radio_6, RelationType::SameScene, 0.25);
        store.add_edge(velvet_static, nme_writer, RelationType::SameScene, 0.25);
        store.add_edge(the_quietus, velvet_static, RelationType::Supports, 0.75);
        store.add_edge(velvet_static, neon_harbor, RelationType::SimilarTo, 0.9);
        store.add_edge(velvet_static, glass_arcade, RelationType::Collaborates, 0.5);
        // Parallel edge to Glass Arcade with a weaker relation type; the
        // collaborates edge must win candidate attribution.
        store.add_edge(velvet_static, glass_arcade, RelationType::Supports, 0.9);

        // Second-ring edges: shared neighbors for common-connection counts,
        // plus Mirror Motel two hops out.
        store.add_edge(neon_harbor, amazing_radio, RelationType::SameScene, 0.3);
        store.add_edge(neon_harbor, bbc_radio_6, RelationType::SameScene, 0.3);
        store.add_edge(glass_arcade, bbc_radio_6, RelationType::SameScene, 0.3);
        store.add_edge(glass_arcade, mirror_motel, RelationType::Collaborates, 0.5);

        // Isolated chain: Driftline -> Echo Parade -> Foxglove Unit -> Gilt Motif
        let chain = [
            store.add_node(Node::artist("Driftline", Some("US"), &["ambient"])),
            store.add_node(Node::artist("Echo Parade", Some("US"), &["ambient"])),
            store.add_node(Node::artist("Foxglove Unit", Some("US"), &["ambient"])),
            store.add_node(Node::artist("Gilt Motif", Some("US"), &["ambient"])),
        ];
        for pair in chain.windows(2) {
            store.add_edge(pair[0], pair[1], RelationType::SimilarTo, 0.8);
        }

        // Seven-hop relay, one hop past the depth ceiling.
        let mut relay = [Uuid::nil(); 8];
        for (i, slot) in relay.iter_mut().enumerate() {
            *slot = store.add_node(Node::artist(&format!("Relay {i}"), None, &[]));
        }
        for pair in relay.windows(2) {
            store.add_edge(pair[0], pair[1], RelationType::SimilarTo, 0.9);
        }

        // Influence diamond: both branches are two hops, but the similar-to
        // branch has the lighter edge weights.
        let diamond_src = store.add_node(Node::artist("Atlas Weaver", Some("NO"), &["folk"]));
        let diamond_supports = store.add_node(Node::artist("Basalt Choir", Some("NO"), &["folk"]));
        let diamond_similar = store.add_node(Node::artist("Citrine Falls", Some("NO"), &["folk"]));
        let diamond_dst = store.add_node(Node::artist("Delta Meridian", Some("NO"), &["folk"]));

        store.add_edge(diamond_src, diamond_supports, RelationType::Supports, 0.9);
        store.add_edge(diamond_supports, diamond_dst, RelationType::Supports, 0.9);
        store.add_edge(diamond_src, diamond_similar, RelationType::SimilarTo, 0.3);
        store.add_edge(diamond_similar, diamond_dst, RelationType::SimilarTo, 0.3);

        Self {
            store,
            velvet_static,
            neon_harbor,
            glass_arcade,
            mirror_motel,
            amazing_radio,
            bbc_radio_6,
            nme_writer,
            the_quietus,
            chain,
            relay,
            diamond_src,
            diamond_supports,
            diamond_similar,
            diamond_dst,
        }
    }
}

/// Six German artists for the pulse tests: one clear riser with a full set
/// of signals, one silent act with none, and four single-edge neighbors in
/// between.
pub struct PulseGraph {
    pub store: MemoryGraphStore,
    pub riser: Uuid,
    pub flat: Uuid,
    pub peers: [Uuid; 3],
    pub cross_act: Uuid,
}

impl PulseGraph {
    pub fn create() -> Self {
        let mut store = MemoryGraphStore::new();

        let riser = store.add_node(
            Node::artist("Brandt Circuit", Some("DE"), &["techno"])
                .with_activity(&[10.0, 12.0, 18.0, 30.0]),
        );
        let flat = store.add_node(Node::artist("Harbor Quiet", Some("DE"), &["ambient"]));
        let peers = [
            store.add_node(Node::artist("Kino Veld", Some("DE"), &["techno"])),
            store.add_node(Node::artist("Lupa Nord", Some("DE"), &["techno"])),
            store.add_node(Node::artist("Marzahn Echo", Some("DE"), &["techno"])),
        ];
        let cross_act = store.add_node(Node::artist("Tempel Drift", Some("DE"), &["jazz"]));

        store.add_edge(riser, peers[0], RelationType::SimilarTo, 0.8);
        store.add_edge(riser, peers[1], RelationType::SimilarTo, 0.7);
        store.add_edge(riser, peers[2], RelationType::SimilarTo, 0.6);
        store.add_edge(riser, cross_act, RelationType::Crossover, 0.8);

        Self {
            store,
            riser,
            flat,
            peers,
            cross_act,
        }
    }
}
