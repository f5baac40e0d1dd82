use metrum::hashed_list::HashedLinkedList;

fn main() {
    let mut list = HashedLinkedList::new();

    // Build a sequence and splice an element in after an anchor
    list.push_back("takeoff").unwrap();
    list.push_back("cruise").unwrap();
    list.push_back("landing").unwrap();
    list.insert_after("climb", &"takeoff").unwrap();

    println!("sequence:");
    for phase in list.iter() {
        println!("  {}", phase);
    }

    // O(1) neighbor lookups around any member
    println!(
        "before 'cruise': {}",
        list.neighbor_before(&"cruise").unwrap()
    );
    println!("after 'cruise': {}", list.neighbor_after(&"cruise").unwrap());

    // A detached cursor survives its own removals but notices foreign ones
    let mut cursor = list.cursor();
    while let Some(phase) = cursor.next(&list).unwrap() {
        if *phase == "climb" {
            break;
        }
    }
    cursor.remove(&mut list).unwrap();
    println!("after removing 'climb': {} phases", list.len());
}
