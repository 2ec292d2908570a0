//! # Host CLI
//!
//! 最小命令行宿主：在终端里走一遍完整的演出流程，
//! 演示协调层、会话层和引擎如何配合。
//!
//! 扇出策略：一个客户端持有一个独立引擎，服务端只做
//! 名册与广播簿记，不触碰任何引擎。

use dialogue_runtime::{
    ClientConfig, ClientRole, DialogueClient, DialogueServer, Line, Scene, ServerConfig,
    analyze_scenes,
};

fn authored_scenes() -> Vec<Scene> {
    vec![
        Scene::new("opening", "第一幕：雨夜")
            .with_line(Line::new(1, "Alice", "你听见那声音了吗？", "curious"))
            .with_line(
                Line::new(2, "Bob", "……也许是风。", "thoughtful").with_direction("望向窗外"),
            )
            .with_branch("open_door", "hallway")
            .with_branch("stay", "parlor"),
        Scene::new("hallway", "第二幕：走廊")
            .with_line(Line::new(1, "Eve", "你们不该来这里。", "calm")),
        Scene::new("parlor", "第二幕：客厅")
            .with_line(Line::new(1, "Alice", "还是这里安全些。", "relieved")),
    ]
}

fn show(line: &Line) {
    match &line.direction {
        Some(direction) => println!("  {} [{}]（{}）：{}", line.character, line.emotion, direction, line.text),
        None => println!("  {} [{}]：{}", line.character, line.emotion, line.text),
    }
}

fn main() {
    let scenes = authored_scenes();

    // 演出前的剧本静态检查（纯咨询性，不影响运行时行为）
    let report = analyze_scenes(&scenes);
    if !report.is_empty() {
        println!("剧本诊断：");
        for diagnostic in &report.diagnostics {
            println!("  {diagnostic}");
        }
        println!();
    }

    // 协调层：启动服务端并登记观众
    let mut server = DialogueServer::new(ServerConfig::default());
    server.start();
    for id in ["alice-seat-1", "bob-seat-2"] {
        if let Err(err) = server.register_client(id) {
            eprintln!("登记 {id} 失败：{err}");
        }
    }

    // 会话层：观众客户端各自持有引擎
    let mut client = DialogueClient::new(
        ClientConfig::new("alice-seat-1").with_role(ClientRole::Audience),
    );
    println!("{}", client.connect());
    for scene in scenes {
        client.load_scene(scene);
    }

    // 演出：第一幕线性推进
    server.set_scene("opening");
    println!("\n== 开演：opening ==");
    if let Some(first) = client.start_scene("opening") {
        show(&first);
    }
    while let Some(line) = client.advance() {
        show(&line);
    }

    // 分支：观众选择开门
    println!("\n可选分支：{:?}", client.engine().available_branches());
    if let Some(line) = client.choose("open_door") {
        server.set_scene("hallway");
        println!("\n== 切到：{} ==", client.engine().active_scene().unwrap_or("?"));
        show(&line);
    }
    while let Some(line) = client.advance() {
        show(&line);
    }

    // 谢幕
    println!("\nAlice 此刻的情绪：{}", client.engine().character_emotion("Alice"));
    println!("交互记录 {} 条", client.interaction_count());
    client.disconnect();
    server.stop();
    println!("服务端状态：{:?}", server.state());
}
