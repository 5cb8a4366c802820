use nbt_finder::{
    BigEndian, LittleEndian, SearchCriteria, read_compressed, read_document, region::RegionFile,
    search,
};

pub fn test_document(data: &[u8]) {
    let criteria = SearchCriteria::new().value("minecraft:elytra");
    if let Ok(document) = read_compressed::<BigEndian>(data) {
        let _ = search(&document.root, Some(document.name.as_str()), &criteria, "root");
    }
    if let Ok(document) = read_document::<LittleEndian>(data) {
        let _ = search(&document.root, None, &criteria, "root");
    }
}

pub fn test_region(data: &[u8]) {
    let Ok(region) = RegionFile::from_bytes(data.to_vec()) else {
        return;
    };
    for x in 0..32 {
        for z in 0..32 {
            let _ = region.read_cell(x, z);
        }
    }
}

pub fn test(data: &[u8]) {
    test_document(data);
    test_region(data);
}
