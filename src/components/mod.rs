pub mod legend;
pub mod review_graph;
