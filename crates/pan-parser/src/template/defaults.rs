//! 내장 기본 템플릿 (PAN-OS 8.1)
//!
//! 사용자 템플릿이 비어 있는 분류에 적용됩니다. 사용자 템플릿은 분류 단위로
//! 기본값을 통째로 대체하며, 필드 단위로 병합하지 않습니다.
//!
//! 위치는 페이로드 필드 목록의 인덱스입니다. 0번(선행 FUTURE_USE)은 매핑하지 않으며
//! `pa_type`은 항상 3번입니다.

use super::PanMessageType;

/// SYSTEM 기본 템플릿 (13개 필드)
pub const SYSTEM_TEMPLATE: &str = "\
position,field,type
1,pa_time_received,STRING
2,serial_number,STRING
3,pa_type,STRING
4,content_type,STRING
6,pa_time_generated,STRING
7,virtual_system,STRING
8,event_id,STRING
9,object,STRING
12,module,STRING
13,pa_severity,STRING
14,description,STRING
21,pa_virtualsys_name,STRING
22,pa_devicename,STRING
";

/// THREAT 기본 템플릿 (72개 필드, 최대 위치 73)
pub const THREAT_TEMPLATE: &str = "\
position,field,type
1,pa_time_received,STRING
2,serial_number,STRING
3,pa_type,STRING
4,threat_type,STRING
5,pa_unknown,STRING
6,generated_time,STRING
7,src_ip,STRING
8,dest_ip,STRING
9,nat_src_ip,STRING
10,nat_dest_ip,STRING
11,pa_rule_name,STRING
12,pa_src_user,STRING
13,pa_dest_user,STRING
14,pa_application,STRING
15,pa_virtualsys,STRING
16,pa_src_zone,STRING
17,pa_dest_zone,STRING
18,pa_inbound_int,STRING
19,pa_outbound_int,STRING
20,pa_log_action,STRING
21,pa_future_use0,STRING
22,pa_session_id,LONG
23,pa_repeat_count,LONG
24,src_port,LONG
25,dest_port,LONG
26,nat_src_port,LONG
27,nat_dest_port,LONG
28,pa_flags,STRING
29,protocol,STRING
30,action,STRING
31,pa_misc,STRING
32,pa_threatID,STRING
33,pa_noname,STRING
34,pa_severity,STRING
35,pa_direction,STRING
36,pa_seqnum,LONG
37,action_flags,STRING
38,pa_src_location,STRING
39,pa_dest_location,STRING
40,future_use,STRING
41,content_type,STRING
42,pcap_id,LONG
43,pa_file_digest,STRING
44,pa_cloud,STRING
45,url_index,LONG
46,user_agent,STRING
47,file_type,STRING
49,x-forwarded-for,STRING
50,http_referer,STRING
51,email_sender,STRING
52,email_subject,STRING
53,email_recipient,STRING
54,report_id,LONG
55,dvc_hierarchy_l1,LONG
56,dvc_hierarchy_l2,LONG
57,dvc_hierarchy_l3,LONG
58,dvc_hierarchy_l4,LONG
59,pa_virtualsys_name,STRING
60,pa_devicename,STRING
61,pa_src_vm_uuid,STRING
62,pa_dest_vm_uuid,STRING
63,http_method,STRING
64,pa_tunnel_id_imsi,LONG
65,pa_monitortag_imei,STRING
66,pa_parent_session_id,LONG
67,pa_parent_start_time,STRING
68,pa_tunnel_type,STRING
69,threat_category,STRING
70,pa_content_version,STRING
71,future_use_end,STRING
72,pa_sctp_assoc_id,LONG
73,pa_payload_prot_id,LONG
";

/// TRAFFIC 기본 템플릿 (37개 필드)
pub const TRAFFIC_TEMPLATE: &str = "\
position,field,type
1,pa_time_received,STRING
2,serial_number,STRING
3,pa_type,STRING
4,content_type,STRING
6,pa_time_generated,STRING
7,src_ip,STRING
8,dest_ip,STRING
9,nat_src_ip,STRING
10,nat_dest_ip,STRING
11,rule_name,STRING
12,src_user,STRING
13,dest_user,STRING
14,application,STRING
15,pa_virtualsys_name,STRING
16,src_zone,STRING
17,dst_zone,STRING
18,interface_inbound,STRING
19,interface_outbound,STRING
20,log_action,STRING
22,session_id,LONG
23,repeat_count,LONG
24,src_port,LONG
25,dest_port,LONG
26,nat_src_port,LONG
27,nat_dest_port,LONG
29,protocol,STRING
30,action,STRING
31,bytes,LONG
32,bytes_sent,LONG
33,bytes_received,LONG
34,packets,LONG
37,category,STRING
41,src_location,STRING
42,dest_location,STRING
44,packets_sent,LONG
45,packets_received,LONG
51,pa_devicename,STRING
";

/// 분류의 기본 템플릿 텍스트를 반환합니다.
pub fn default_template(message_type: PanMessageType) -> &'static str {
    match message_type {
        PanMessageType::System => SYSTEM_TEMPLATE,
        PanMessageType::Threat => THREAT_TEMPLATE,
        PanMessageType::Traffic => TRAFFIC_TEMPLATE,
    }
}
