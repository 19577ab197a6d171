//! A word index supporting prefix traversal and whole-word membership
//! tests, built from a sequence of words.
//!
//! [`Lexicon`] is an arena-backed trie with incremental minimization: as
//! words are inserted in sorted order, fully-built suffix states are
//! folded into a shared register so that equivalent subtrees (most
//! commonly the ones spelling out common suffixes like `-ING` or
//! `-ED`) are stored once, the way a DAWG does. Any caller that only
//! needs whole-word membership (the scorer, GCG replay) can instead
//! depend on the narrower [`WordJudge`] trait, which a plain
//! `HashSet<String>` can also satisfy for tests.

use crate::game::tile::Letter;
use std::collections::HashMap;
use std::fmt;

/// The identifier of a single lexicon node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

/// Anything that can answer "is this a whole word?" Implemented by
/// [`Lexicon`], and by `HashSet<String>`/`HashSet<&str>` so that tests can
/// stand in a plain word list without building an index.
pub trait WordJudge {
    /// Checks whether `word` (case-insensitive) is a complete word.
    fn contains(&self, word: &str) -> bool;
}
impl WordJudge for std::collections::HashSet<String> {
    fn contains(&self, word: &str) -> bool {
        self.contains(&word.to_ascii_uppercase())
    }
}
impl WordJudge for std::collections::HashSet<&str> {
    fn contains(&self, word: &str) -> bool {
        let word = word.to_ascii_uppercase();
        self.iter().any(|w| w.eq_ignore_ascii_case(&word))
    }
}

/// Diagnostics returned from [`Lexicon::build`], describing how many
/// lines of an input word list were accepted, and how many were
/// skipped for failing validation (per the CLI's line-skipping
/// contract).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// The number of words successfully inserted into the lexicon.
    pub accepted: usize,
    /// The number of input lines skipped: empty, containing a
    /// non-alphabetic character, or longer than the board (15 letters).
    pub skipped: usize,
}

/// The maximum length of a word that can appear on the 15x15 board.
pub const MAX_WORD_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Node {
    terminal: bool,
    children: [Option<NodeId>; 26],
}
impl Node {
    fn empty() -> Self {
        Self {
            terminal: false,
            children: [None; 26],
        }
    }
}

/// A word index over the 26-letter alphabet, supporting `O(|word|)`
/// prefix traversal and membership tests.
#[derive(Clone)]
pub struct Lexicon {
    nodes: Vec<Node>,
}
impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexicon {{ nodes: {} }}", self.nodes.len())
    }
}
impl Default for Lexicon {
    fn default() -> Self {
        Self {
            nodes: vec![Node::empty()],
        }
    }
}
impl Lexicon {
    /// The root node, representing the empty prefix.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }
    /// Checks whether `node` corresponds to a complete word.
    pub fn is_terminal(&self, node: NodeId) -> bool {
        self.nodes[node.0 as usize].terminal
    }
    /// Follows the edge labelled `letter` from `node`, if one exists.
    pub fn step(&self, node: NodeId, letter: Letter) -> Option<NodeId> {
        self.nodes[node.0 as usize].children[usize::from(letter)]
    }
    /// Iterates over the outgoing edges of `node`. Order is the
    /// alphabet order `A..=Z`; callers must not depend on any
    /// particular order beyond that it is deterministic.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = (Letter, NodeId)> + '_ {
        self.nodes[node.0 as usize]
            .children
            .iter()
            .enumerate()
            .filter_map(|(idx, child)| child.map(|c| (Letter::from(idx), c)))
    }
    /// Follows `word` from the root, returning the node reached if
    /// every letter has a matching edge.
    pub fn trace(&self, word: &str) -> Option<NodeId> {
        let mut node = self.root();
        for ch in word.chars() {
            let letter = Letter::new(ch)?;
            node = self.step(node, letter)?;
        }
        Some(node)
    }
    /// The total number of nodes in the index, after minimization.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    /// Builds a [`Lexicon`] from a lazy sequence of words. Each word is
    /// validated: blank or whitespace-only lines, lines containing a
    /// non-alphabetic character, and words longer than
    /// [`MAX_WORD_LEN`] are rejected and counted in the returned
    /// [`BuildReport`] rather than causing the build to fail. Valid
    /// words are upper-cased, deduplicated and sorted before the
    /// minimizing insertion pass runs, so the words need not arrive
    /// in any particular order.
    pub fn build<I>(words: I) -> (Self, BuildReport)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut report = BuildReport::default();
        let mut valid = Vec::new();

        for word in words {
            let word = word.as_ref().trim();

            if word.is_empty() || word.len() > MAX_WORD_LEN || !word.chars().all(|c| c.is_ascii_alphabetic()) {
                report.skipped += 1;
                continue;
            }

            valid.push(word.to_ascii_uppercase());
            report.accepted += 1;
        }

        valid.sort_unstable();
        valid.dedup();
        // `dedup` may have removed duplicates that were separately
        // counted as accepted; `accepted` should reflect distinct words.
        report.accepted = valid.len();

        let mut builder = Builder::new();
        for word in &valid {
            builder.insert(word);
        }

        (builder.finish(), report)
    }
}
impl WordJudge for Lexicon {
    fn contains(&self, word: &str) -> bool {
        self.trace(word).map_or(false, |n| self.is_terminal(n))
    }
}

/// A mutable node used only during construction; frozen into an
/// immutable [`Node`] once its subtree will never change again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BuildNode {
    terminal: bool,
    children: [Option<NodeId>; 26],
}
impl BuildNode {
    fn empty() -> Self {
        Self {
            terminal: false,
            children: [None; 26],
        }
    }
}

/// Incrementally minimizing trie builder, in the style of Daciuk's
/// algorithm: since words are inserted in sorted order, any suffix
/// subtree that will not be touched again (because the next word to
/// insert diverges before it) can immediately be checked against a
/// register of already-built, structurally-identical states and
/// folded into whichever one was built first.
struct Builder {
    nodes: Vec<BuildNode>,
    /// The path of node ids from the root down to the end of the
    /// previously inserted word, used to find the common prefix
    /// length with the next word to insert.
    previous: Vec<NodeId>,
    previous_word: String,
    /// A De-duplicating register of minimized states, keyed by their
    /// full structural signature.
    register: HashMap<BuildNode, NodeId>,
}
impl Builder {
    fn new() -> Self {
        Self {
            nodes: vec![BuildNode::empty()],
            previous: vec![NodeId(0)],
            previous_word: String::new(),
            register: HashMap::new(),
        }
    }
    fn node(&self, id: NodeId) -> &BuildNode {
        &self.nodes[id.0 as usize]
    }
    fn node_mut(&mut self, id: NodeId) -> &mut BuildNode {
        &mut self.nodes[id.0 as usize]
    }
    fn push_node(&mut self, node: BuildNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Inserts `word`, which must be `>=` the previously inserted word
    /// in sort order (the caller sorts and dedups beforehand).
    fn insert(&mut self, word: &str) {
        let common = common_prefix_len(&self.previous_word, word);

        // Everything below `previous[common_len]` is now final: fold it
        // into the register, replacing each node with its minimized
        // equivalent if one is already registered.
        for depth in (common..self.previous.len() - 1).rev() {
            let child = self.previous[depth + 1];
            let minimized = self.replace_or_register(child);
            let parent = self.previous[depth];
            let letter = Letter::new(self.previous_word.as_bytes()[depth] as char).unwrap();
            self.node_mut(parent).children[usize::from(letter)] = Some(minimized);
        }

        self.previous.truncate(common + 1);

        // Append fresh, not-yet-minimized states for the suffix unique
        // to `word`.
        let mut current = self.previous[common];
        for ch in word.chars().skip(common) {
            let letter = Letter::new(ch).expect("validated alphabetic word");
            let next = self.push_node(BuildNode::empty());
            self.node_mut(current).children[usize::from(letter)] = Some(next);
            self.previous.push(next);
            current = next;
        }

        self.node_mut(current).terminal = true;
        self.previous_word = word.to_string();
    }

    /// If `id`'s current contents match a state already in the
    /// register, returns the registered id (discarding `id`'s node,
    /// which becomes dead weight in `self.nodes` but is never
    /// referenced again). Otherwise registers `id` as-is.
    fn replace_or_register(&mut self, id: NodeId) -> NodeId {
        let node = self.node(id).clone();

        if let Some(&existing) = self.register.get(&node) {
            existing
        } else {
            self.register.insert(node, id);
            id
        }
    }

    /// Finalizes the build: folds the last word's suffix into the
    /// register and freezes the (possibly sparse, due to dead nodes
    /// left behind by minimization) node table into a [`Lexicon`].
    fn finish(mut self) -> Lexicon {
        for depth in (0..self.previous.len().saturating_sub(1)).rev() {
            let child = self.previous[depth + 1];
            let minimized = self.replace_or_register(child);
            let parent = self.previous[depth];
            let letter = Letter::new(self.previous_word.as_bytes()[depth] as char).unwrap();
            self.node_mut(parent).children[usize::from(letter)] = Some(minimized);
        }

        let nodes = self
            .nodes
            .into_iter()
            .map(|n| Node {
                terminal: n.terminal,
                children: n.children,
            })
            .collect();

        Lexicon { nodes }
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_accepts_valid_words_and_skips_bad_lines() {
        let (_lexicon, report) = Lexicon::build(["cat", "DOG", "", "t0o-long-1234567", "a b"]);
        assert_eq!(report.accepted, 2);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn contains_round_trips_inserted_words() {
        let (lexicon, _) = Lexicon::build(["cat", "cats", "dog", "do"]);

        assert!(lexicon.contains("CAT"));
        assert!(lexicon.contains("cat"));
        assert!(lexicon.contains("CATS"));
        assert!(lexicon.contains("DOG"));
        assert!(lexicon.contains("DO"));
        assert!(!lexicon.contains("CA"));
        assert!(!lexicon.contains("D"));
        assert!(!lexicon.contains("CATSUP"));
    }

    #[test]
    fn empty_lexicon_contains_nothing() {
        let (lexicon, report) = Lexicon::build(Vec::<String>::new());
        assert_eq!(report.accepted, 0);
        assert!(!lexicon.contains("A"));
    }

    #[test]
    fn traversal_matches_membership() {
        let (lexicon, _) = Lexicon::build(["quant", "quant"]);
        let node = lexicon.trace("QUANT").unwrap();
        assert!(lexicon.is_terminal(node));
        assert!(lexicon.trace("QUA").is_some());
        assert!(!lexicon.is_terminal(lexicon.trace("QUA").unwrap()));
    }

    #[test]
    fn shared_suffixes_are_minimized() {
        // Every word here ends in "ING": the insertion order is sorted,
        // so the suffix subtree should be folded into one register entry.
        let (lexicon, _) = Lexicon::build(["baking", "making", "raking", "taking"]);
        assert!(lexicon.contains("BAKING"));
        assert!(lexicon.contains("MAKING"));
        assert!(lexicon.contains("RAKING"));
        assert!(lexicon.contains("TAKING"));
        assert!(!lexicon.contains("BAK"));
    }

    #[test]
    fn hashset_satisfies_word_judge() {
        let set: std::collections::HashSet<String> =
            ["CAT".to_string(), "DOG".to_string()].into_iter().collect();
        assert!(WordJudge::contains(&set, "cat"));
        assert!(!WordJudge::contains(&set, "bird"));
    }
}
