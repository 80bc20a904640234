/// XML output for records.
///
/// This module writes records into an XML document as part of a batch
/// pipeline. The implementation uses `quick-xml` events, so the output is
/// attribute-free and indented element by element.
///
/// # Example
///
/// ```
/// use students_in_room::item::xml::XmlItemWriterBuilder;
/// use students_in_room::core::item::ItemWriter;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Product {
///     name: String,
///     price: f64,
///     categories: Vec<String>,
/// }
///
/// let products = vec![Product {
///     name: "Smartphone".to_string(),
///     price: 599.99,
///     categories: vec!["Electronics".to_string(), "Mobile".to_string()],
/// }];
///
/// let writer = XmlItemWriterBuilder::new()
///     .root_tag("catalog")
///     .item_tag("product")
///     .declaration(false)
///     .from_writer::<Product, _>(Vec::new());
///
/// writer.open().unwrap();
/// writer.write(&products).unwrap();
/// writer.close().unwrap();
///
/// let content = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(
///     content,
///     "<catalog>
///   <product>
///     <name>Smartphone</name>
///     <price>599.99</price>
///     <categories>
///       <product>Electronics</product>
///       <product>Mobile</product>
///     </categories>
///   </product>
/// </catalog>
/// "
/// );
/// ```
pub mod xml_writer;

pub use xml_writer::XmlItemWriter;
pub use xml_writer::XmlItemWriterBuilder;
