    use super::*;

    fn def(name: &'static str, aliases: &'static [&'static str]) -> CommandDef {
        CommandDef {
            name,
            aliases,
            usage: "",
            help: "",
        }
    }

    #[test]
    fn exact_beats_prefix_beats_substring() {
        assert_eq!(score_match("send", "send"), 100);
        assert!(score_match("se", "send") > score_match("se", "preset"));
        assert_eq!(score_match("set", "preset"), 10);
        assert_eq!(score_match("zz", "send"), 0);
    }

    #[test]
    fn aliases_count_toward_the_score() {
        let help = def("help", &["h", "?"]);
        assert_eq!(score_def("?", &help), 100);
    }

    #[test]
    fn ties_sort_by_name() {
        let mut scored = vec![(10, def("say", &[])), (20, def("send", &[])), (10, def("edit", &[]))];
        sort_scored_suggestions(&mut scored);
        let names: Vec<&str> = scored.iter().map(|(_, d)| d.name).collect();
        assert_eq!(names, ["send", "edit", "say"]);
    }
