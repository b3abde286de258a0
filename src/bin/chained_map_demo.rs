use chainmap::ChainedMap;

fn main() {
    let mut table = ChainedMap::new();

    table.insert("John", 45);
    table.insert("Doe", 32);
    table.insert("Anna", 67);
    table.insert("John", 50);

    println!("Lookup John: {:?}", table.lookup("John"));
    println!("Lookup Doe: {:?}", table.lookup("Doe"));
    println!("Lookup Mark: {:?}", table.lookup("Mark"));

    println!("Delete Doe: {}", table.delete("Doe"));
    println!("Delete Mark: {}", table.delete("Mark"));

    println!(
        "{} entries in {} buckets (load factor {:.3})",
        table.len(),
        table.bucket_count(),
        table.load_factor()
    );
    print!("{}", table);
}
