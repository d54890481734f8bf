use weft::{
    core::{Attrs, Value},
    graph::{EdgeQuery, Graph, Target},
};

fn main() {
    // Two-way streets are undirected, one-way streets directed.
    let mut city = Graph::digraph()
        .build([
            ("Station", "Market", Attrs::from([("kind", "oneway")]).with("weight", 4)),
            ("Market", "Harbor", Attrs::from([("kind", "oneway")]).with("weight", 2)),
        ])
        .unwrap();

    let street = |weight: i64| Attrs::from([("kind", "street")]).with("weight", weight);

    city.add_undirected_edge(("Station", "Park", street(3)))
        .unwrap();
    city.add_undirected_edge(("Park", "Harbor", street(6)))
        .unwrap();
    city.add_attr(Target::node("Harbor"), "population", 1200).unwrap();

    let plan = city.clone();

    // Road works turn the market street into a two-way street.
    city.add_undirected_edge(("Market", "Station", Attrs::from([("kind", "street")])))
        .unwrap();

    for (name, graph) in [("plan", &plan), ("today", &city)] {
        println!("{name}:");

        for edge in graph.out_edges(&"Station") {
            println!(
                "  Station -> {} (weight {}, {})",
                edge.dst,
                edge.weight(),
                if edge.is_directed() { "one-way" } else { "two-way" }
            );
        }
    }

    let streets = city
        .find_edges(&EdgeQuery::new().attr("kind", "street"))
        .count();
    println!("two-way streets today: {streets}");

    let back = city.transpose();
    println!(
        "reachable from Harbor when driving backwards: {:?}",
        back.successors(&"Harbor").collect::<Vec<_>>()
    );

    assert_eq!(city.weight(("Station", "Market")), Ok(Some(Value::Int(4))));
    println!("{}", city.to_dot());
}
