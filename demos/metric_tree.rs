use metrum::geometry::{DistanceMetric, EuclideanDistance};
use metrum::metric_tree::MetricTree;

// Define a custom distance metric (Manhattan distance)
struct ManhattanDistance;

impl DistanceMetric<(i64, i64)> for ManhattanDistance {
    fn distance(a: &(i64, i64), b: &(i64, i64)) -> f64 {
        ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64
    }
}

fn main() {
    // Create a metric tree over 2D integer keys with Euclidean distance
    let mut tree: MetricTree<(i64, i64), &str, EuclideanDistance> = MetricTree::new();

    // Insert some keys with values
    tree.put((10, 20), "station-a").unwrap();
    tree.put((80, 30), "station-b").unwrap();
    tree.put((45, 70), "station-c").unwrap();

    // Query the tree for the 2 nearest neighbors to a point
    let neighbors = tree.knn_search(&(12, 22), 2).unwrap();
    println!("2 nearest neighbors to (12, 22):");
    for neighbor in &neighbors {
        println!(
            "  {:?} -> {} at distance {:.2}",
            neighbor.key, neighbor.value, neighbor.distance
        );
    }

    // Query the tree for everything within a radius
    let in_range = tree.range_search(&(12, 22), 50.0).unwrap();
    println!("{} stations within 50.0 of (12, 22)", in_range.len());

    // The same key space indexed under Manhattan distance
    let mut manhattan: MetricTree<(i64, i64), &str, ManhattanDistance> = MetricTree::new();
    manhattan.put((10, 20), "station-a").unwrap();
    manhattan.put((80, 30), "station-b").unwrap();
    let nearest = manhattan.nearest(&(12, 22)).unwrap().unwrap();
    println!(
        "Manhattan-nearest to (12, 22): {:?} at distance {}",
        nearest.key, nearest.distance
    );
}
