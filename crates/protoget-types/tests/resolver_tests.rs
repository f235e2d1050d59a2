use protoget_parser::parser::{NodeArena, NodeIndex, ParserState, preorder};
use protoget_parser::render;
use protoget_types::{
    MethodSig, PackageInput, ProgramTypes, SourceUnit, TypeId, resolve_file, resolve_program,
};

struct Parsed {
    arena: NodeArena,
    root: NodeIndex,
}

fn parse(name: &str, source: &str) -> Parsed {
    let mut parser = ParserState::new(name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors in {name}: {:?}",
        parser.get_diagnostics()
    );
    Parsed {
        arena: parser.into_arena(),
        root,
    }
}

/// All nodes whose rendered text is exactly `text`.
fn nodes_rendering(parsed: &Parsed, text: &str) -> Vec<NodeIndex> {
    preorder(&parsed.arena, parsed.root)
        .filter(|&idx| render(&parsed.arena, idx).is_ok_and(|t| t == text))
        .collect()
}

fn display_type_of(types: &ProgramTypes, package: usize, file: usize, node: NodeIndex) -> Option<String> {
    let info = types.type_info(package, file)?;
    info.type_of(node).map(|ty| types.interner.display(ty))
}

/// Type of the last node rendering as `text` in a single-file program.
fn type_of_last(parsed: &Parsed, types: &ProgramTypes, text: &str) -> Option<String> {
    let node = *nodes_rendering(parsed, text)
        .last()
        .unwrap_or_else(|| panic!("no node renders as {text:?}"));
    display_type_of(types, 0, 0, node)
}

const PERSON: &str = r#"package pb

type Person struct {
	Name string
	Age  int
	Tags []string
}

func (x *Person) ProtoMessage() {}

func (x *Person) GetName() string { return x.Name }
"#;

#[test]
fn types_parameters_fields_and_methods() {
    let source = format!(
        "{PERSON}\nfunc use(m *Person) {{\n\tn := m.Name\n\tg := m.GetName()\n\tt := m.Tags[0]\n\tprint(n, g, t)\n}}\n"
    );
    let parsed = parse("person.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "m").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "m.Name").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "m.GetName").as_deref(), Some("func() string"));
    assert_eq!(type_of_last(&parsed, &types, "m.GetName()").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "m.Tags[0]").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "n").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "g").as_deref(), Some("string"));
}

#[test]
fn receivers_are_typed_inside_method_bodies() {
    let parsed = parse("person.go", PERSON);
    let types = resolve_file(&parsed.arena, parsed.root);
    assert_eq!(type_of_last(&parsed, &types, "x").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "x.Name").as_deref(), Some("string"));
}

#[test]
fn builtins_new_and_address_of() {
    let source = format!(
        "{PERSON}\nfunc build() {{\n\tm := new(Person)\n\tv := *m\n\tp := &v.Age\n\tok := true\n\tprint(m, v, p, ok)\n}}\n"
    );
    let parsed = parse("build.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "new(Person)").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "m").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "v").as_deref(), Some("pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "&v.Age").as_deref(), Some("*int"));
    assert_eq!(type_of_last(&parsed, &types, "ok").as_deref(), Some("bool"));
    // Type names are not values.
    assert_eq!(type_of_last(&parsed, &types, "Person"), None);
}

#[test]
fn unknown_imports_are_untyped_namespaces() {
    let source = format!(
        "{PERSON}\nfunc show(m *Person) {{\n\tfmt.Println(m.Name)\n}}\n"
    )
    .replacen("package pb\n", "package pb\n\nimport \"fmt\"\n", 1);
    let parsed = parse("show.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "fmt"), None);
    assert_eq!(type_of_last(&parsed, &types, "fmt.Println"), None);
    assert_eq!(type_of_last(&parsed, &types, "m.Name").as_deref(), Some("string"));
}

#[test]
fn locals_shadow_imports_and_blocks_scope_locals() {
    let source = r#"package p

import "fmt"

type Box struct {
	N int
}

func f(b *Box) {
	if true {
		fmt := b
		print(fmt.N)
	}
	fmt.Println(b)
}
"#;
    let parsed = parse("shadow.go", source);
    let types = resolve_file(&parsed.arena, parsed.root);

    let fmt_uses = nodes_rendering(&parsed, "fmt");
    let typed: Vec<_> = fmt_uses
        .iter()
        .map(|&idx| display_type_of(&types, 0, 0, idx))
        .collect();
    // The declaring `fmt :=` is a definition, not a typed use. Inside the
    // `if` block `fmt` is the local `*p.Box`; after it, the import again.
    assert_eq!(typed, vec![None, Some("*p.Box".to_string()), None]);
}

#[test]
fn multi_value_short_declarations_take_call_results() {
    let source = r#"package p

func pair() (string, error) { return "", nil }

func f() {
	s, err := pair()
	print(s, err)
}
"#;
    let parsed = parse("pair.go", source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "pair").as_deref(), Some("func() (string, error)"));
    assert_eq!(type_of_last(&parsed, &types, "pair()"), None);
    assert_eq!(type_of_last(&parsed, &types, "s").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "err").as_deref(), Some("error"));
}

#[test]
fn package_vars_are_visible_in_bodies() {
    let source = r#"package p

type Box struct {
	N int
}

var shared = new(Box)
var count int

func f() {
	print(shared.N, count)
}
"#;
    let parsed = parse("vars.go", source);
    let types = resolve_file(&parsed.arena, parsed.root);
    assert_eq!(type_of_last(&parsed, &types, "shared").as_deref(), Some("*p.Box"));
    assert_eq!(type_of_last(&parsed, &types, "count").as_deref(), Some("int"));
}

#[test]
fn imported_message_types_resolve_across_packages() {
    let pb = parse("gen/pb/person.pb.go", PERSON);
    let app = parse(
        "app/main.go",
        r#"package main

import (
	"fmt"

	pbx "example.com/project/gen/pb"
)

func show(m *pbx.Person) {
	fmt.Println(m.Name)
}
"#,
    );

    let program = [
        PackageInput {
            path: "gen/pb".to_string(),
            files: vec![SourceUnit {
                arena: &pb.arena,
                root: pb.root,
            }],
        },
        PackageInput {
            path: "app".to_string(),
            files: vec![SourceUnit {
                arena: &app.arena,
                root: app.root,
            }],
        },
    ];
    let mut types = resolve_program(&program);
    assert_eq!(types.package_count(), 2);

    let m = *nodes_rendering(&app, "m").last().unwrap();
    let ty = types.type_info(1, 0).unwrap().type_of(m).expect("typed receiver");
    assert_eq!(types.interner.display(ty), "*pb.Person");

    let marker = types.interner.interface(vec![MethodSig {
        name: "ProtoMessage".to_string(),
        signature: TypeId::EMPTY_SIGNATURE,
    }]);
    let shape = types.interner.shape(ty, marker);
    assert!(shape.implements_marker());
    assert!(shape.record().unwrap().has_field("Name"));
}

#[test]
fn range_bindings_take_key_and_value_types() {
    let source = format!(
        "{PERSON}\nfunc walk(people []*Person, byName map[string]*Person, s string) {{\n\tfor i, p := range people {{\n\t\tprint(i, p)\n\t}}\n\tfor k, v := range byName {{\n\t\tprint(k, v)\n\t}}\n\tfor _, r := range s {{\n\t\tprint(r)\n\t}}\n}}\n"
    );
    let parsed = parse("walk.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "i").as_deref(), Some("int"));
    assert_eq!(type_of_last(&parsed, &types, "p").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "k").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "v").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "r").as_deref(), Some("int32"));
}

#[test]
fn composite_literals_and_comma_ok_indexes_are_typed() {
    let source = format!(
        "{PERSON}\nfunc build() {{\n\tp := &Person{{Name: \"a\"}}\n\tps := []*Person{{{{Name: \"b\"}}}}\n\tbyName := map[string]*Person{{\"a\": p}}\n\tfound, ok := byName[\"a\"]\n\tprint(p, ps[0], found, ok)\n}}\n"
    );
    let parsed = parse("build.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "p").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "ps[0]").as_deref(), Some("*pb.Person"));
    assert_eq!(
        type_of_last(&parsed, &types, "byName").as_deref(),
        Some("map[string]*pb.Person")
    );
    assert_eq!(type_of_last(&parsed, &types, "found").as_deref(), Some("*pb.Person"));
    assert_eq!(type_of_last(&parsed, &types, "ok").as_deref(), Some("bool"));
}

#[test]
fn function_literals_see_enclosing_locals() {
    let source = format!(
        "{PERSON}\nfunc later(m *Person) {{\n\tname := func() string {{\n\t\treturn m.Name\n\t}}\n\tprint(name())\n}}\n"
    );
    let parsed = parse("later.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "m.Name").as_deref(), Some("string"));
    assert_eq!(type_of_last(&parsed, &types, "name").as_deref(), Some("func() string"));
    assert_eq!(type_of_last(&parsed, &types, "name()").as_deref(), Some("string"));
}

#[test]
fn type_switch_bindings_follow_the_case() {
    let source = format!(
        "{PERSON}\nfunc describe(x interface{{}}) {{\n\tswitch v := x.(type) {{\n\tcase *Person:\n\t\tprint(v.Name)\n\tcase int, string:\n\t\tprint(v)\n\t}}\n}}\n"
    );
    let parsed = parse("describe.go", &source);
    let types = resolve_file(&parsed.arena, parsed.root);

    let typed: Vec<String> = nodes_rendering(&parsed, "v")
        .into_iter()
        .filter_map(|idx| display_type_of(&types, 0, 0, idx))
        .collect();
    // A clause listing several types keeps the guarded operand's type.
    assert_eq!(typed, vec!["*pb.Person".to_string(), "interface{}".to_string()]);
    assert_eq!(type_of_last(&parsed, &types, "v.Name").as_deref(), Some("string"));
}

#[test]
fn const_specs_without_values_repeat_the_previous_type() {
    let source = r#"package p

func f() {
	const (
		small int = iota
		large
	)
	const (
		half = 0.5
		quarter
	)
	print(large, quarter)
}
"#;
    let parsed = parse("consts.go", source);
    let types = resolve_file(&parsed.arena, parsed.root);

    assert_eq!(type_of_last(&parsed, &types, "large").as_deref(), Some("int"));
    assert_eq!(type_of_last(&parsed, &types, "quarter").as_deref(), Some("float64"));
}
