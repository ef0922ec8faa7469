use leafhtml::{builder::Builder, bumpalo::Bump, convert_all, Fragment};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bump = Bump::new();
    let b = Builder::new(&bump);

    let fragments = [
        Fragment::text("Rendered with "),
        Fragment::bold("leafhtml"),
        Fragment::text(", see "),
        Fragment::link("the docs", "https://example.com/docs"),
        Fragment::text(" or run "),
        Fragment::code("cargo run --example inline_paragraph"),
        Fragment::image("a diagram", "/img/diagram.png"),
    ];

    let children = convert_all(&bump, &fragments)?;
    let article = b.article([b.attr(("class", "post"))])([
        b.h1([])("Inline fragments")?,
        b.p([])(children)?,
    ])?;

    println!("{}", article.render()?);
    Ok(())
}
